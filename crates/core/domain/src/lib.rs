//! 领域模型：资产、供应商、制造商、位置、用户、角色。
//!
//! 领域实体不感知存储形态；每个实体提供一个字段枚举（实现 `DomainField`），
//! 供查询层构造过滤条件。

/// 声明字段枚举并实现 `DomainField`。
macro_rules! domain_fields {
    (
        $(#[$meta:meta])*
        $name:ident for $entity:literal {
            $($variant:ident => ($member:literal, $kind:ident)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl fam_query::DomainField for $name {
            const ENTITY: &'static str = $entity;

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $member),+
                }
            }

            fn kind(self) -> fam_query::FieldKind {
                match self {
                    $($name::$variant => fam_query::FieldKind::$kind),+
                }
            }

            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }
        }
    };
}

pub mod asset;
pub mod catalog;
pub mod directory;

pub use asset::{Asset, AssetField, AssetStatus};
pub use catalog::{Location, LocationField, Manufacturer, ManufacturerField, Supplier, SupplierField};
pub use directory::{Role, RoleField, User, UserField};

/// 当前时间（毫秒）。
pub fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|duration| duration.as_millis() as i64)
        .unwrap_or_default()
}
