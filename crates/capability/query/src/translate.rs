//! 领域条件 → 存储条件翻译
//!
//! 两步完成：
//! 1. 成员重绑定：把每个领域字段替换为映射表中的同名存储列
//! 2. 字面量校验：检查值类型与列类型一致，并把 `= null` / `<> null` 改写为空值判断
//!
//! 纯函数，不触达存储。

use crate::error::TranslationError;
use crate::filter::{CompareOp, DomainField, Expr};
use crate::mapping::{Column, FieldMap, StorageEntity};
use crate::value::{FieldKind, Value};

/// 存储侧过滤条件。
pub type StorageFilter = Expr<Column>;

/// 把领域实体上的过滤条件翻译为存储实体上的等价条件。
pub fn translate<F: DomainField, S: StorageEntity>(
    filter: &Expr<F>,
    fields: &FieldMap<F, S>,
) -> Result<StorageFilter, TranslationError> {
    let rebound = filter.try_map_fields(&mut |field: &F| fields.resolve(*field))?;
    normalize(rebound, F::ENTITY)
}

fn normalize(expr: StorageFilter, entity: &'static str) -> Result<StorageFilter, TranslationError> {
    Ok(match expr {
        Expr::And(left, right) => Expr::And(
            Box::new(normalize(*left, entity)?),
            Box::new(normalize(*right, entity)?),
        ),
        Expr::Or(left, right) => Expr::Or(
            Box::new(normalize(*left, entity)?),
            Box::new(normalize(*right, entity)?),
        ),
        Expr::Not(inner) => Expr::Not(Box::new(normalize(*inner, entity)?)),
        Expr::Compare(column, op, Value::Null) => match op {
            CompareOp::Eq => Expr::IsNull(column),
            CompareOp::Ne => Expr::Not(Box::new(Expr::IsNull(column))),
            _ => {
                return Err(TranslationError::UnsupportedNull {
                    entity,
                    member: column.member,
                });
            }
        },
        Expr::Compare(column, op, value) => {
            ensure_fits(entity, &column, &value)?;
            Expr::Compare(column, op, value)
        }
        Expr::Text(column, op, text) => {
            if column.kind != FieldKind::String {
                return Err(TranslationError::TypeMismatch {
                    entity,
                    member: column.member,
                    expected: column.kind.as_str(),
                    got: "text pattern",
                });
            }
            Expr::Text(column, op, text)
        }
        Expr::In(column, values) => {
            for value in &values {
                if value.is_null() {
                    return Err(TranslationError::UnsupportedNull {
                        entity,
                        member: column.member,
                    });
                }
                ensure_fits(entity, &column, value)?;
            }
            Expr::In(column, values)
        }
        Expr::IsNull(column) => Expr::IsNull(column),
    })
}

fn ensure_fits(entity: &'static str, column: &Column, value: &Value) -> Result<(), TranslationError> {
    if value.fits(column.kind) {
        return Ok(());
    }
    Err(TranslationError::TypeMismatch {
        entity,
        member: column.member,
        expected: column.kind.as_str(),
        got: value.kind().map(FieldKind::as_str).unwrap_or("null"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{TextOp, field};
    use crate::sort::SortKey;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum GadgetField {
        Name,
        Rank,
        Label,
    }

    impl DomainField for GadgetField {
        const ENTITY: &'static str = "Gadget";

        fn name(self) -> &'static str {
            match self {
                GadgetField::Name => "name",
                GadgetField::Rank => "rank",
                GadgetField::Label => "label",
            }
        }

        fn kind(self) -> FieldKind {
            match self {
                GadgetField::Name | GadgetField::Label => FieldKind::String,
                GadgetField::Rank => FieldKind::I64,
            }
        }

        fn all() -> &'static [Self] {
            &[GadgetField::Name, GadgetField::Rank, GadgetField::Label]
        }
    }

    #[derive(Debug, Clone)]
    struct GadgetRow;

    const NAME: Column = Column::new("Name", "gadget_name", FieldKind::String).sortable();
    const RANK: Column = Column::new("RANK", "rank", FieldKind::I64).sortable();
    const ID: Column = Column::new("id", "id", FieldKind::I64).sortable();
    const DEFAULT_ORDER: &[SortKey] = &[NAME.asc()];

    impl StorageEntity for GadgetRow {
        const TABLE: &'static str = "gadgets";

        fn columns() -> &'static [Column] {
            &[ID, NAME, RANK]
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

    fn fields() -> FieldMap<GadgetField, GadgetRow> {
        FieldMap::by_name().expect("mapping")
    }

    #[test]
    fn rebinds_members_case_insensitively() {
        let filter = field(GadgetField::Name)
            .starts_with("g")
            .and(field(GadgetField::Rank).ge(3_i64));
        let translated = translate(&filter, &fields()).expect("translate");
        assert_eq!(
            translated,
            Expr::Text(NAME, TextOp::StartsWith, "g".to_string())
                .and(Expr::Compare(RANK, CompareOp::Ge, Value::I64(3)))
        );
    }

    #[test]
    fn domain_only_member_is_reported() {
        let map = fields();
        assert_eq!(map.unmapped(), &[GadgetField::Label]);
        let filter = field(GadgetField::Name)
            .eq("a")
            .or(field(GadgetField::Label).contains("x"));
        let err = translate(&filter, &map).expect_err("missing member");
        assert_eq!(
            err,
            TranslationError::MissingMember {
                entity: "Gadget",
                member: "label"
            }
        );
        assert_eq!(err.to_string(), "Gadget.label has no storage counterpart");
    }

    #[test]
    fn null_comparisons_become_null_checks() {
        let filter = field(GadgetField::Rank)
            .eq(Value::Null)
            .or(field(GadgetField::Name).ne(Value::Null));
        let translated = translate(&filter, &fields()).expect("translate");
        assert_eq!(
            translated,
            Expr::IsNull(RANK).or(Expr::IsNull(NAME).negate())
        );

        let err = translate(&field(GadgetField::Rank).gt(Value::Null), &fields())
            .expect_err("ordering null");
        assert!(matches!(err, TranslationError::UnsupportedNull { .. }));
    }

    #[test]
    fn literal_kind_is_checked() {
        let err = translate(&field(GadgetField::Rank).eq("high"), &fields()).expect_err("kind");
        assert_eq!(
            err,
            TranslationError::TypeMismatch {
                entity: "Gadget",
                member: "RANK",
                expected: "i64",
                got: "string"
            }
        );
        let err = translate(&field(GadgetField::Rank).contains("1"), &fields()).expect_err("text");
        assert!(matches!(err, TranslationError::TypeMismatch { .. }));
    }

    #[test]
    fn mismatched_kinds_fail_registration() {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        struct RankAsText;

        impl DomainField for RankAsText {
            const ENTITY: &'static str = "Gadget";

            fn name(self) -> &'static str {
                "rank"
            }

            fn kind(self) -> FieldKind {
                FieldKind::String
            }

            fn all() -> &'static [Self] {
                &[RankAsText]
            }
        }

        let err = FieldMap::<RankAsText, GadgetRow>::by_name().expect_err("kind mismatch");
        assert!(matches!(err, crate::error::MappingError::KindMismatch { .. }));
    }
}
