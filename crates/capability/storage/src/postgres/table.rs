//! 通用 Postgres 表
//!
//! 把存储条件、排序、分页编译为参数化 SQL（`sqlx::QueryBuilder`）：
//! - 列名、表名全部来自静态成员表，字面量一律走参数绑定
//! - 文本匹配编译为 `like`，通配符 `%` `_` 与转义符 `\` 先转义
//! - 软删除列自动加入 where 条件
//! - 预加载的关联编译为 left join
//! - 文本排序键附加 `collate "C"`，按字节序排序，与内存实现一致

use crate::error::StorageError;
use async_trait::async_trait;
use fam_query::{
    Collection, Column, Expr, FieldKind, SortKey, StorageEntity, StorageFilter, StorageQuery,
    TextOp, Value,
};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::{Postgres, QueryBuilder};
use std::marker::PhantomData;
use uuid::Uuid;

/// 可预加载的关联（join 子句与附加的 select 列）。
#[derive(Debug, Clone, Copy)]
pub struct Relation {
    pub name: &'static str,
    pub join: &'static str,
    pub select: &'static str,
}

/// Postgres 中的存储实体：声明关联并从结果行解码。
pub trait PgEntity: StorageEntity {
    fn joins() -> &'static [Relation] {
        &[]
    }

    /// 从结果行解码；只有 `includes` 中的关联列会被读取
    fn from_row(row: &PgRow, includes: &[&'static str]) -> Result<Self, sqlx::Error>;
}

pub struct PgTable<S> {
    pool: PgPool,
    _row: PhantomData<fn() -> S>,
}

impl<S: PgEntity> PgTable<S> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _row: PhantomData,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// 按主键查找可见行
    pub async fn find(
        &self,
        id: Uuid,
        includes: &[&'static str],
    ) -> Result<Option<S>, StorageError> {
        let mut qb = select_from::<S>(includes);
        push_where::<S>(&mut qb, None);
        qb.push(" and ")
            .push(qualified(S::TABLE, &S::id_column()))
            .push(" = ")
            .push_bind(id);
        let row = qb.build().fetch_optional(&self.pool).await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(S::from_row(&row, includes)?))
    }

    /// 软删除（没有软删除列的表直接删除）
    pub async fn soft_delete(&self, id: Uuid, now_ms: i64) -> Result<bool, StorageError> {
        let id_column = S::id_column().column;
        let result = match (S::soft_delete_column(), S::find_column("updatedAt")) {
            (Some(flag), Some(touched)) => {
                let sql = format!(
                    "update {table} set {flag} = true, {touched} = $2 \
                     where {id_column} = $1 and {flag} = false",
                    table = S::TABLE,
                    flag = flag.column,
                    touched = touched.column,
                );
                sqlx::query(&sql)
                    .bind(id)
                    .bind(now_ms)
                    .execute(&self.pool)
                    .await?
            }
            (Some(flag), None) => {
                let sql = format!(
                    "update {table} set {flag} = true where {id_column} = $1 and {flag} = false",
                    table = S::TABLE,
                    flag = flag.column,
                );
                sqlx::query(&sql).bind(id).execute(&self.pool).await?
            }
            (None, _) => {
                let sql = format!("delete from {} where {id_column} = $1", S::TABLE);
                sqlx::query(&sql).bind(id).execute(&self.pool).await?
            }
        };
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl<S: PgEntity> Collection<S> for PgTable<S> {
    type Error = StorageError;

    async fn count(&self, filter: Option<&StorageFilter>) -> Result<u64, StorageError> {
        let mut qb = QueryBuilder::new("select count(*) from ");
        qb.push(S::TABLE);
        push_where::<S>(&mut qb, filter);
        let total = qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn fetch(&self, query: &StorageQuery) -> Result<Vec<S>, StorageError> {
        let mut qb = select_from::<S>(&query.includes);
        push_where::<S>(&mut qb, query.filter.as_ref());
        push_order(&mut qb, S::TABLE, &query.order);
        qb.push(" limit ")
            .push_bind(i64::try_from(query.take).unwrap_or(i64::MAX))
            .push(" offset ")
            .push_bind(i64::try_from(query.skip).unwrap_or(i64::MAX));
        let rows = qb.build().fetch_all(&self.pool).await?;
        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(S::from_row(&row, &query.includes)?);
        }
        Ok(items)
    }
}

/// 逗号分隔的全部列名（用于 returning 子句）
pub fn column_list<S: StorageEntity>() -> String {
    S::columns()
        .iter()
        .map(|column| column.column)
        .collect::<Vec<_>>()
        .join(", ")
}

fn qualified(table: &str, column: &Column) -> String {
    format!("{table}.{}", column.column)
}

fn select_from<'args, S: PgEntity>(includes: &[&'static str]) -> QueryBuilder<'args, Postgres> {
    let mut qb = QueryBuilder::new("select ");
    let columns = S::columns()
        .iter()
        .map(|column| qualified(S::TABLE, column))
        .collect::<Vec<_>>()
        .join(", ");
    qb.push(columns);
    let relations: Vec<&Relation> = S::joins()
        .iter()
        .filter(|relation| includes.contains(&relation.name))
        .collect();
    for relation in &relations {
        qb.push(", ").push(relation.select);
    }
    qb.push(" from ").push(S::TABLE);
    for relation in &relations {
        qb.push(" ").push(relation.join);
    }
    qb
}

fn push_where<S: StorageEntity>(qb: &mut QueryBuilder<'_, Postgres>, filter: Option<&StorageFilter>) {
    qb.push(" where ");
    match S::soft_delete_column() {
        Some(flag) => qb.push(qualified(S::TABLE, &flag)).push(" = false"),
        None => qb.push("true"),
    };
    if let Some(filter) = filter {
        qb.push(" and ");
        push_filter(qb, S::TABLE, filter);
    }
}

/// 把存储条件编译为 where 片段
pub fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, table: &str, expr: &StorageFilter) {
    match expr {
        Expr::And(left, right) => {
            qb.push("(");
            push_filter(qb, table, left);
            qb.push(" and ");
            push_filter(qb, table, right);
            qb.push(")");
        }
        Expr::Or(left, right) => {
            qb.push("(");
            push_filter(qb, table, left);
            qb.push(" or ");
            push_filter(qb, table, right);
            qb.push(")");
        }
        Expr::Not(inner) => {
            qb.push("not (");
            push_filter(qb, table, inner);
            qb.push(")");
        }
        Expr::Compare(column, op, value) => {
            qb.push(qualified(table, column))
                .push(" ")
                .push(op.as_sql())
                .push(" ");
            push_value(qb, column.kind, value);
        }
        Expr::Text(column, op, text) => {
            qb.push(qualified(table, column))
                .push(" like ")
                .push_bind(like_pattern(*op, text))
                .push(" escape '\\'");
        }
        Expr::In(column, values) => {
            if values.is_empty() {
                qb.push("false");
                return;
            }
            qb.push(qualified(table, column)).push(" in (");
            for (index, value) in values.iter().enumerate() {
                if index > 0 {
                    qb.push(", ");
                }
                push_value(qb, column.kind, value);
            }
            qb.push(")");
        }
        Expr::IsNull(column) => {
            qb.push(qualified(table, column)).push(" is null");
        }
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, kind: FieldKind, value: &Value) {
    match (kind, value) {
        (_, Value::Null) => qb.push("null"),
        (FieldKind::F64, Value::I64(number)) => qb.push_bind(*number as f64),
        (_, Value::String(text)) => qb.push_bind(text.clone()),
        (_, Value::I64(number)) => qb.push_bind(*number),
        (_, Value::F64(number)) => qb.push_bind(*number),
        (_, Value::Bool(flag)) => qb.push_bind(*flag),
        (_, Value::Uuid(id)) => qb.push_bind(*id),
    };
}

/// 编译 order by 子句（Postgres 默认升序 NULL 在后、降序 NULL 在前）
pub fn push_order(qb: &mut QueryBuilder<'_, Postgres>, table: &str, order: &[SortKey]) {
    if order.is_empty() {
        return;
    }
    let keys = order
        .iter()
        .map(|key| {
            let collate = if key.column.kind == FieldKind::String {
                " collate \"C\""
            } else {
                ""
            };
            format!(
                "{}{} {}",
                qualified(table, &key.column),
                collate,
                key.dir.as_sql()
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    qb.push(" order by ").push(keys);
}

/// 转义 like 通配符
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn like_pattern(op: TextOp, text: &str) -> String {
    let escaped = escape_like(text);
    match op {
        TextOp::Contains => format!("%{escaped}%"),
        TextOp::StartsWith => format!("{escaped}%"),
        TextOp::EndsWith => format!("%{escaped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetRow, asset_columns};
    use fam_query::CompareOp;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like(r"50%_off\now"), r"50\%\_off\\now");
        assert_eq!(like_pattern(TextOp::StartsWith, "item-1"), "item-1%");
        assert_eq!(like_pattern(TextOp::EndsWith, "_x"), r"%\_x");
    }

    #[test]
    fn filter_compiles_to_parameterized_sql() {
        let filter = Expr::Text(asset_columns::NAME, TextOp::StartsWith, "item-1".to_string())
            .and(Expr::Compare(
                asset_columns::PURCHASE_COST,
                CompareOp::Ge,
                Value::I64(100),
            ))
            .and(Expr::IsNull(asset_columns::LOCATION_ID).negate());
        let mut qb = QueryBuilder::<Postgres>::new("select 1 from assets");
        push_where::<AssetRow>(&mut qb, Some(&filter));
        assert_eq!(
            qb.sql(),
            "select 1 from assets where assets.is_deleted = false and \
             ((assets.name like $1 escape '\\' and assets.purchase_cost >= $2) \
             and not (assets.location_id is null))"
        );
    }

    #[test]
    fn empty_in_list_matches_nothing() {
        let mut qb = QueryBuilder::<Postgres>::new("");
        push_filter(&mut qb, "assets", &Expr::In(asset_columns::STATUS, Vec::new()));
        assert_eq!(qb.sql(), "false");

        let mut qb = QueryBuilder::<Postgres>::new("");
        push_filter(
            &mut qb,
            "assets",
            &Expr::In(asset_columns::STATUS, vec!["available".into(), "in_use".into()]),
        );
        assert_eq!(qb.sql(), "assets.status in ($1, $2)");
    }

    #[test]
    fn order_and_relations_compile() {
        let mut qb = select_from::<AssetRow>(&["location"]);
        push_order(
            &mut qb,
            "assets",
            &[asset_columns::NAME.desc(), asset_columns::ID.asc()],
        );
        let sql = qb.sql();
        assert!(sql.contains("location.name as location_name"));
        assert!(sql.contains(" from assets left join locations location"));
        assert!(!sql.contains("supplier_name"));
        assert!(sql.ends_with(r#" order by assets.name collate "C" desc, assets.id asc"#));
    }
}
