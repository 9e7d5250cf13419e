//! 资产目录：供应商、制造商、位置

use uuid::Uuid;

/// 供应商。
#[derive(Debug, Clone, PartialEq)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at_ms: i64,
}

/// 制造商。
#[derive(Debug, Clone, PartialEq)]
pub struct Manufacturer {
    pub id: Uuid,
    pub name: String,
    pub website: Option<String>,
    pub created_at_ms: i64,
}

/// 存放位置（可嵌套）。
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_at_ms: i64,
}

domain_fields! {
    SupplierField for "Supplier" {
        Id => ("id", Uuid),
        Name => ("name", String),
        ContactEmail => ("contactEmail", String),
        Phone => ("phone", String),
        IsActive => ("isActive", Bool),
        CreatedAt => ("createdAt", I64),
    }
}

domain_fields! {
    ManufacturerField for "Manufacturer" {
        Id => ("id", Uuid),
        Name => ("name", String),
        Website => ("website", String),
        CreatedAt => ("createdAt", I64),
    }
}

domain_fields! {
    LocationField for "Location" {
        Id => ("id", Uuid),
        Name => ("name", String),
        Address => ("address", String),
        ParentId => ("parentId", Uuid),
        CreatedAt => ("createdAt", I64),
    }
}
