//! 动态排序解析
//!
//! 排序串格式：逗号分隔的成员名，`-` 前缀表示降序，例如 `name,-createdAt`。
//!
//! 解析规则：
//! - 成员名按存储实体的排序白名单匹配（忽略大小写）
//! - 无法解析的成员跳过并记录告警，不报错
//! - 没有任何有效成员时使用实体的默认排序
//! - 主键始终作为最后的决胜键追加，保证分页边界稳定

use crate::mapping::{Column, StorageEntity};

/// 排序方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

/// 单个排序键。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub column: Column,
    pub dir: SortDir,
}

/// 解析后的排序：主排序键在前，其余依次为次级决胜键。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    keys: Vec<SortKey>,
    skipped: Vec<String>,
    defaulted: bool,
}

impl OrderBy {
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn into_keys(self) -> Vec<SortKey> {
        self.keys
    }

    /// 被跳过的排序成员（原样保留）
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// 是否回退到了默认排序
    pub fn is_default(&self) -> bool {
        self.defaulted
    }
}

/// 排序串中的一个片段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortToken<'a> {
    pub member: &'a str,
    pub dir: SortDir,
}

/// 拆分排序串（不做成员校验）。
pub fn parse_sort(spec: &str) -> Vec<SortToken<'_>> {
    spec.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match token.strip_prefix('-') {
            Some(member) => SortToken {
                member: member.trim(),
                dir: SortDir::Desc,
            },
            None => SortToken {
                member: token,
                dir: SortDir::Asc,
            },
        })
        .collect()
}

/// 把排序串解析为存储实体上的排序。
pub fn resolve_sort<S: StorageEntity>(spec: Option<&str>) -> OrderBy {
    let mut keys: Vec<SortKey> = Vec::new();
    let mut skipped = Vec::new();
    for token in parse_sort(spec.unwrap_or_default()) {
        let column = S::find_column(token.member).filter(|column| column.sortable);
        match column {
            Some(column) if keys.iter().any(|key| key.column == column) => {
                // 重复成员只取第一次出现的方向
            }
            Some(column) => keys.push(SortKey {
                column,
                dir: token.dir,
            }),
            None => {
                tracing::warn!(
                    table = S::TABLE,
                    member = token.member,
                    "unknown sort member skipped"
                );
                fam_telemetry::record_skipped_sort_field();
                skipped.push(token.member.to_string());
            }
        }
    }

    let defaulted = keys.is_empty();
    if defaulted {
        keys.extend_from_slice(S::default_order());
        fam_telemetry::record_default_ordering();
    }

    let id = S::id_column();
    if !keys.iter().any(|key| key.column == id) {
        keys.push(id.asc());
    }

    OrderBy {
        keys,
        skipped,
        defaulted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{FieldKind, Value};

    #[derive(Debug, Clone)]
    struct WidgetRow;

    const ID: Column = Column::new("id", "id", FieldKind::I64).sortable();
    const NAME: Column = Column::new("name", "name", FieldKind::String).sortable();
    const CREATED_AT: Column = Column::new("createdAt", "created_at", FieldKind::I64).sortable();
    const SECRET: Column = Column::new("secret", "secret", FieldKind::String);
    const DEFAULT_ORDER: &[SortKey] = &[CREATED_AT.desc()];

    impl StorageEntity for WidgetRow {
        const TABLE: &'static str = "widgets";

        fn columns() -> &'static [Column] {
            &[ID, NAME, CREATED_AT, SECRET]
        }

        fn id_column() -> Column {
            ID
        }

        fn default_order() -> &'static [SortKey] {
            DEFAULT_ORDER
        }

        fn value(&self, _member: &str) -> Value {
            Value::Null
        }
    }

    #[test]
    fn parse_sort_splits_and_trims() {
        let tokens = parse_sort(" name , -createdAt,, - id ");
        assert_eq!(
            tokens,
            vec![
                SortToken { member: "name", dir: SortDir::Asc },
                SortToken { member: "createdAt", dir: SortDir::Desc },
                SortToken { member: "id", dir: SortDir::Desc },
            ]
        );
        assert!(parse_sort("").is_empty());
    }

    #[test]
    fn primary_and_secondary_keys_keep_order() {
        let order = resolve_sort::<WidgetRow>(Some("NAME,-createdat"));
        assert_eq!(
            order.keys(),
            &[NAME.asc(), CREATED_AT.desc(), ID.asc()]
        );
        assert!(!order.is_default());
        assert!(order.skipped().is_empty());
    }

    #[test]
    fn unknown_and_unsortable_members_are_skipped() {
        let order = resolve_sort::<WidgetRow>(Some("bogus,-name,secret"));
        assert_eq!(order.keys(), &[NAME.desc(), ID.asc()]);
        assert_eq!(order.skipped(), &["bogus".to_string(), "secret".to_string()]);
    }

    #[test]
    fn empty_or_invalid_falls_back_to_default() {
        for spec in [None, Some(""), Some("nonexistentField")] {
            let order = resolve_sort::<WidgetRow>(spec);
            assert!(order.is_default());
            assert_eq!(order.keys(), &[CREATED_AT.desc(), ID.asc()]);
        }
    }

    #[test]
    fn explicit_id_is_not_duplicated() {
        let order = resolve_sort::<WidgetRow>(Some("-id,name,id"));
        assert_eq!(order.keys(), &[ID.desc(), NAME.asc()]);
    }
}
