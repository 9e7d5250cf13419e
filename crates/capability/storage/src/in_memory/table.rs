//! 通用内存表
//!
//! 用 `RwLock<Vec<S>>` 保存存储行，按 Postgres 的语义执行存储条件：
//! - 比较遵循三值逻辑，NULL 参与的比较结果为未知，未知行不返回
//! - 升序时 NULL 排在最后，降序时排在最前
//! - 软删除的行对查询不可见
//!
//! 关联预加载由各资源存储在取回一页后按引用表回填，见 `asset.rs`。

use crate::error::StorageError;
use async_trait::async_trait;
use fam_query::{
    Collection, Column, CompareOp, Expr, SortDir, SortKey, StorageEntity, StorageFilter,
    StorageQuery, TextOp, Value, compare_values,
};
use std::cmp::Ordering;
use std::sync::RwLock;
use uuid::Uuid;

pub struct InMemoryTable<S> {
    rows: RwLock<Vec<S>>,
}

impl<S: StorageEntity> Default for InMemoryTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StorageEntity> InMemoryTable<S> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    /// 查找可见行
    pub fn find(&self, id: Uuid) -> Result<Option<S>, StorageError> {
        let id = Value::Uuid(id);
        let rows = self
            .rows
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(rows
            .iter()
            .find(|row| is_visible(*row) && row.value(S::id_column().member) == id)
            .cloned())
    }

    /// 按主键查找，包含软删除的行（外键与 left join 同样能看到它们）
    pub fn lookup(&self, id: Uuid) -> Result<Option<S>, StorageError> {
        let id = Value::Uuid(id);
        let rows = self
            .rows
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(rows
            .iter()
            .find(|row| row.value(S::id_column().member) == id)
            .cloned())
    }

    /// 插入新行
    ///
    /// `unique` 中的任一列与现有可见行取值相同时返回冲突。
    pub fn insert(&self, row: S, unique: &[Column]) -> Result<S, StorageError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let id_member = S::id_column().member;
        if rows
            .iter()
            .any(|existing| existing.value(id_member) == row.value(id_member))
        {
            return Err(StorageError::conflict(format!("{} id exists", S::TABLE)));
        }
        for column in unique {
            let candidate = row.value(column.member);
            if rows
                .iter()
                .any(|existing| is_visible(existing) && existing.value(column.member) == candidate)
            {
                return Err(StorageError::conflict(format!(
                    "duplicate {} in {}",
                    column.member,
                    S::TABLE
                )));
            }
        }
        rows.push(row.clone());
        Ok(row)
    }

    /// 原地修改一条可见行，返回修改后的行
    pub fn update(&self, id: Uuid, apply: impl FnOnce(&mut S)) -> Result<Option<S>, StorageError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let id = Value::Uuid(id);
        let Some(row) = rows
            .iter_mut()
            .find(|row| is_visible(&**row) && row.value(S::id_column().member) == id)
        else {
            return Ok(None);
        };
        apply(row);
        Ok(Some(row.clone()))
    }
}

#[async_trait]
impl<S: StorageEntity> Collection<S> for InMemoryTable<S> {
    type Error = StorageError;

    async fn count(&self, filter: Option<&StorageFilter>) -> Result<u64, StorageError> {
        let rows = self
            .rows
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        let total = rows.iter().filter(|row| selects(*row, filter)).count();
        Ok(total as u64)
    }

    async fn fetch(&self, query: &StorageQuery) -> Result<Vec<S>, StorageError> {
        let mut matched: Vec<S> = {
            let rows = self
                .rows
                .read()
                .map_err(|_| StorageError::new("lock failed"))?;
            rows.iter()
                .filter(|row| selects(*row, query.filter.as_ref()))
                .cloned()
                .collect()
        };
        matched.sort_by(|left, right| compare_rows(left, right, &query.order));
        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let take = usize::try_from(query.take).unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(skip).take(take).collect())
    }
}

fn is_visible<S: StorageEntity>(row: &S) -> bool {
    match S::soft_delete_column() {
        Some(column) => row.value(column.member) != Value::Bool(true),
        None => true,
    }
}

fn selects<S: StorageEntity>(row: &S, filter: Option<&StorageFilter>) -> bool {
    if !is_visible(row) {
        return false;
    }
    match filter {
        Some(filter) => eval(row, filter) == Some(true),
        None => true,
    }
}

/// 三值求值：`None` 表示未知（NULL 参与比较）
fn eval<S: StorageEntity>(row: &S, expr: &StorageFilter) -> Option<bool> {
    match expr {
        Expr::And(left, right) => match (eval(row, left), eval(row, right)) {
            (Some(false), _) | (_, Some(false)) => Some(false),
            (Some(true), Some(true)) => Some(true),
            _ => None,
        },
        Expr::Or(left, right) => match (eval(row, left), eval(row, right)) {
            (Some(true), _) | (_, Some(true)) => Some(true),
            (Some(false), Some(false)) => Some(false),
            _ => None,
        },
        Expr::Not(inner) => eval(row, inner).map(|value| !value),
        Expr::Compare(column, op, literal) => {
            let ordering = compare_values(&row.value(column.member), literal)?;
            Some(match op {
                CompareOp::Eq => ordering == Ordering::Equal,
                CompareOp::Ne => ordering != Ordering::Equal,
                CompareOp::Gt => ordering == Ordering::Greater,
                CompareOp::Ge => ordering != Ordering::Less,
                CompareOp::Lt => ordering == Ordering::Less,
                CompareOp::Le => ordering != Ordering::Greater,
            })
        }
        Expr::Text(column, op, pattern) => {
            let value = row.value(column.member);
            let text = value.as_str()?;
            Some(match op {
                TextOp::Contains => text.contains(pattern.as_str()),
                TextOp::StartsWith => text.starts_with(pattern.as_str()),
                TextOp::EndsWith => text.ends_with(pattern.as_str()),
            })
        }
        Expr::In(column, values) => {
            let value = row.value(column.member);
            if value.is_null() {
                return None;
            }
            Some(
                values
                    .iter()
                    .any(|candidate| compare_values(&value, candidate) == Some(Ordering::Equal)),
            )
        }
        Expr::IsNull(column) => Some(row.value(column.member).is_null()),
    }
}

fn compare_rows<S: StorageEntity>(left: &S, right: &S, order: &[SortKey]) -> Ordering {
    for key in order {
        let ordering = nulls_last(
            &left.value(key.column.member),
            &right.value(key.column.member),
        );
        let ordering = match key.dir {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// NULL 视为最大值（与 Postgres 默认一致）
fn nulls_last(left: &Value, right: &Value) -> Ordering {
    match (left.is_null(), right.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => compare_values(left, right).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RoleRow, SupplierRow, role_columns};

    fn role(name: &str, rank: i64, description: Option<&str>) -> RoleRow {
        RoleRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: description.map(str::to_string),
            rank,
            created_at_ms: 0,
            updated_at_ms: 0,
        }
    }

    #[test]
    fn null_comparisons_are_unknown() {
        let row = role("auditor", 1, None);
        let filter = Expr::Compare(role_columns::DESCRIPTION, CompareOp::Ne, Value::from("x"));
        assert_eq!(eval(&row, &filter), None);
        assert_eq!(eval(&row, &filter.clone().negate()), None);
        assert_eq!(eval(&row, &Expr::IsNull(role_columns::DESCRIPTION)), Some(true));
        let either = filter.or(Expr::Compare(role_columns::RANK, CompareOp::Eq, Value::I64(1)));
        assert_eq!(eval(&row, &either), Some(true));
    }

    #[test]
    fn descending_puts_nulls_first() {
        let with = role("a", 1, Some("d"));
        let without = role("b", 1, None);
        let asc = [role_columns::DESCRIPTION.asc()];
        let desc = [role_columns::DESCRIPTION.desc()];
        assert_eq!(compare_rows(&with, &without, &asc), Ordering::Less);
        assert_eq!(compare_rows(&with, &without, &desc), Ordering::Greater);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_unique_value() {
        let table = InMemoryTable::<RoleRow>::new();
        table
            .insert(role("admin", 0, None), &[role_columns::NAME])
            .expect("first insert");
        let err = table
            .insert(role("admin", 5, None), &[role_columns::NAME])
            .expect_err("duplicate");
        assert_eq!(err.kind(), crate::error::StorageErrorKind::Conflict);
        assert_eq!(table.count(None).await.expect("count"), 1);
    }

    #[test]
    fn soft_deleted_rows_are_hidden_from_find_only() {
        let table = InMemoryTable::<SupplierRow>::new();
        let row = SupplierRow {
            id: Uuid::new_v4(),
            name: "Acme".to_string(),
            contact_email: None,
            phone: None,
            is_active: true,
            created_at_ms: 0,
            updated_at_ms: 0,
            is_deleted: false,
        };
        let id = row.id;
        table.insert(row, &[]).expect("insert");
        assert!(table.find(id).expect("find").is_some());

        table.update(id, |row| row.is_deleted = true).expect("delete");
        assert_eq!(table.find(id).expect("find"), None);
        let kept = table.lookup(id).expect("lookup").expect("row kept");
        assert_eq!(kept.name, "Acme");
        assert_eq!(table.lookup(Uuid::new_v4()).expect("lookup"), None);
    }

    #[test]
    fn poisoned_lock_surfaces_as_internal_error() {
        let table = std::sync::Arc::new(InMemoryTable::<RoleRow>::new());
        let poisoner = table.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.rows.write().expect("lock");
            panic!("poison the table lock");
        })
        .join();
        let err = table.find(Uuid::new_v4()).expect_err("poisoned");
        assert_eq!(err.kind(), crate::error::StorageErrorKind::Internal);
    }
}
