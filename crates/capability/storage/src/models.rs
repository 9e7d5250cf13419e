//! 存储数据模型
//!
//! 每张表对应一个存储行结构（`*Row`），并声明：
//! - 成员表（成员名 → 物理列、类型、是否允许排序）
//! - 默认排序、软删除列、可预加载的关联
//! - 与领域实体之间的转换
//!
//! 成员名与领域字段同名（camelCase），映射表按名称自动建立。

use domain::{Asset, AssetStatus, Location, Manufacturer, Role, Supplier, User};
use fam_query::{Column, SortKey, StorageEntity, Value};
use uuid::Uuid;

pub mod asset_columns {
    use fam_query::{Column, FieldKind, SortKey};

    pub const ID: Column = Column::new("id", "id", FieldKind::Uuid).sortable();
    pub const NAME: Column = Column::new("name", "name", FieldKind::String).sortable();
    pub const ASSET_TAG: Column = Column::new("assetTag", "asset_tag", FieldKind::String).sortable();
    pub const SERIAL_NUMBER: Column =
        Column::new("serialNumber", "serial_number", FieldKind::String).sortable();
    pub const STATUS: Column = Column::new("status", "status", FieldKind::String).sortable();
    pub const PURCHASE_COST: Column =
        Column::new("purchaseCost", "purchase_cost", FieldKind::F64).sortable();
    pub const PURCHASE_DATE: Column =
        Column::new("purchaseDate", "purchase_date", FieldKind::I64).sortable();
    pub const SUPPLIER_ID: Column = Column::new("supplierId", "supplier_id", FieldKind::Uuid);
    pub const MANUFACTURER_ID: Column =
        Column::new("manufacturerId", "manufacturer_id", FieldKind::Uuid);
    pub const LOCATION_ID: Column = Column::new("locationId", "location_id", FieldKind::Uuid);
    pub const ASSIGNED_TO: Column = Column::new("assignedTo", "assigned_to", FieldKind::Uuid);
    pub const CREATED_AT: Column = Column::new("createdAt", "created_at", FieldKind::I64).sortable();
    pub const UPDATED_AT: Column = Column::new("updatedAt", "updated_at", FieldKind::I64).sortable();
    pub const IS_DELETED: Column = Column::new("isDeleted", "is_deleted", FieldKind::Bool);

    pub const ALL: &[Column] = &[
        ID,
        NAME,
        ASSET_TAG,
        SERIAL_NUMBER,
        STATUS,
        PURCHASE_COST,
        PURCHASE_DATE,
        SUPPLIER_ID,
        MANUFACTURER_ID,
        LOCATION_ID,
        ASSIGNED_TO,
        CREATED_AT,
        UPDATED_AT,
        IS_DELETED,
    ];
    pub const DEFAULT_ORDER: &[SortKey] = &[CREATED_AT.desc()];
}

pub mod supplier_columns {
    use fam_query::{Column, FieldKind, SortKey};

    pub const ID: Column = Column::new("id", "id", FieldKind::Uuid).sortable();
    pub const NAME: Column = Column::new("name", "name", FieldKind::String).sortable();
    pub const CONTACT_EMAIL: Column =
        Column::new("contactEmail", "contact_email", FieldKind::String).sortable();
    pub const PHONE: Column = Column::new("phone", "phone", FieldKind::String);
    pub const IS_ACTIVE: Column = Column::new("isActive", "is_active", FieldKind::Bool).sortable();
    pub const CREATED_AT: Column = Column::new("createdAt", "created_at", FieldKind::I64).sortable();
    pub const UPDATED_AT: Column = Column::new("updatedAt", "updated_at", FieldKind::I64).sortable();
    pub const IS_DELETED: Column = Column::new("isDeleted", "is_deleted", FieldKind::Bool);

    pub const ALL: &[Column] = &[
        ID,
        NAME,
        CONTACT_EMAIL,
        PHONE,
        IS_ACTIVE,
        CREATED_AT,
        UPDATED_AT,
        IS_DELETED,
    ];
    pub const DEFAULT_ORDER: &[SortKey] = &[NAME.asc()];
}

pub mod manufacturer_columns {
    use fam_query::{Column, FieldKind, SortKey};

    pub const ID: Column = Column::new("id", "id", FieldKind::Uuid).sortable();
    pub const NAME: Column = Column::new("name", "name", FieldKind::String).sortable();
    pub const WEBSITE: Column = Column::new("website", "website", FieldKind::String);
    pub const CREATED_AT: Column = Column::new("createdAt", "created_at", FieldKind::I64).sortable();
    pub const UPDATED_AT: Column = Column::new("updatedAt", "updated_at", FieldKind::I64).sortable();
    pub const IS_DELETED: Column = Column::new("isDeleted", "is_deleted", FieldKind::Bool);

    pub const ALL: &[Column] = &[ID, NAME, WEBSITE, CREATED_AT, UPDATED_AT, IS_DELETED];
    pub const DEFAULT_ORDER: &[SortKey] = &[NAME.asc()];
}

pub mod location_columns {
    use fam_query::{Column, FieldKind, SortKey};

    pub const ID: Column = Column::new("id", "id", FieldKind::Uuid).sortable();
    pub const NAME: Column = Column::new("name", "name", FieldKind::String).sortable();
    pub const ADDRESS: Column = Column::new("address", "address", FieldKind::String);
    pub const PARENT_ID: Column = Column::new("parentId", "parent_id", FieldKind::Uuid);
    pub const CREATED_AT: Column = Column::new("createdAt", "created_at", FieldKind::I64).sortable();
    pub const UPDATED_AT: Column = Column::new("updatedAt", "updated_at", FieldKind::I64).sortable();
    pub const IS_DELETED: Column = Column::new("isDeleted", "is_deleted", FieldKind::Bool);

    pub const ALL: &[Column] = &[ID, NAME, ADDRESS, PARENT_ID, CREATED_AT, UPDATED_AT, IS_DELETED];
    pub const DEFAULT_ORDER: &[SortKey] = &[NAME.asc()];
}

pub mod user_columns {
    use fam_query::{Column, FieldKind, SortKey};

    pub const ID: Column = Column::new("id", "id", FieldKind::Uuid).sortable();
    pub const USERNAME: Column = Column::new("username", "username", FieldKind::String).sortable();
    pub const EMAIL: Column = Column::new("email", "email", FieldKind::String).sortable();
    pub const FULL_NAME: Column = Column::new("fullName", "full_name", FieldKind::String).sortable();
    pub const IS_ACTIVE: Column = Column::new("isActive", "is_active", FieldKind::Bool);
    pub const ROLE_ID: Column = Column::new("roleId", "role_id", FieldKind::Uuid);
    pub const CREATED_AT: Column = Column::new("createdAt", "created_at", FieldKind::I64).sortable();
    pub const UPDATED_AT: Column = Column::new("updatedAt", "updated_at", FieldKind::I64).sortable();

    pub const ALL: &[Column] = &[
        ID, USERNAME, EMAIL, FULL_NAME, IS_ACTIVE, ROLE_ID, CREATED_AT, UPDATED_AT,
    ];
    pub const DEFAULT_ORDER: &[SortKey] = &[USERNAME.asc()];
}

pub mod role_columns {
    use fam_query::{Column, FieldKind, SortKey};

    pub const ID: Column = Column::new("id", "id", FieldKind::Uuid).sortable();
    pub const NAME: Column = Column::new("name", "name", FieldKind::String).sortable();
    pub const DESCRIPTION: Column = Column::new("description", "description", FieldKind::String);
    pub const RANK: Column = Column::new("rank", "rank", FieldKind::I64).sortable();
    pub const CREATED_AT: Column = Column::new("createdAt", "created_at", FieldKind::I64).sortable();
    pub const UPDATED_AT: Column = Column::new("updatedAt", "updated_at", FieldKind::I64).sortable();

    pub const ALL: &[Column] = &[ID, NAME, DESCRIPTION, RANK, CREATED_AT, UPDATED_AT];
    pub const DEFAULT_ORDER: &[SortKey] = &[RANK.asc(), NAME.asc()];
}

/// 资产可预加载的关联
pub const ASSET_RELATIONS: &[&str] = &["supplier", "location"];

/// 资产表记录。
///
/// `supplier_name` / `location_name` 仅在预加载对应关联时填充。
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRow {
    pub id: Uuid,
    pub name: String,
    pub asset_tag: String,
    pub serial_number: Option<String>,
    pub status: String,
    pub purchase_cost: Option<f64>,
    pub purchase_date_ms: Option<i64>,
    pub supplier_id: Option<Uuid>,
    pub manufacturer_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub is_deleted: bool,
    pub supplier_name: Option<String>,
    pub location_name: Option<String>,
}

impl AssetRow {
    pub fn from_domain(asset: &Asset, now_ms: i64) -> Self {
        Self {
            id: asset.id,
            name: asset.name.trim().to_string(),
            asset_tag: asset.asset_tag.trim().to_string(),
            serial_number: asset.serial_number.clone(),
            status: asset.status.as_str().to_string(),
            purchase_cost: asset.purchase_cost,
            purchase_date_ms: asset.purchase_date_ms,
            supplier_id: asset.supplier_id,
            manufacturer_id: asset.manufacturer_id,
            location_id: asset.location_id,
            assigned_to: asset.assigned_to,
            created_at_ms: asset.created_at_ms,
            updated_at_ms: now_ms,
            is_deleted: false,
            supplier_name: None,
            location_name: None,
        }
    }

    /// 应用部分更新（`None` 表示保持原值）
    pub fn apply(&mut self, update: &AssetUpdate, now_ms: i64) {
        if let Some(name) = &update.name {
            self.name = name.trim().to_string();
        }
        if let Some(serial_number) = &update.serial_number {
            self.serial_number = Some(serial_number.clone());
        }
        if let Some(status) = update.status {
            self.status = status.as_str().to_string();
        }
        if let Some(cost) = update.purchase_cost {
            self.purchase_cost = Some(cost);
        }
        if let Some(id) = update.supplier_id {
            self.supplier_id = Some(id);
        }
        if let Some(id) = update.manufacturer_id {
            self.manufacturer_id = Some(id);
        }
        if let Some(id) = update.location_id {
            self.location_id = Some(id);
        }
        if let Some(id) = update.assigned_to {
            self.assigned_to = Some(id);
        }
        self.updated_at_ms = now_ms;
    }
}

impl StorageEntity for AssetRow {
    const TABLE: &'static str = "assets";

    fn columns() -> &'static [Column] {
        asset_columns::ALL
    }

    fn id_column() -> Column {
        asset_columns::ID
    }

    fn default_order() -> &'static [SortKey] {
        asset_columns::DEFAULT_ORDER
    }

    fn soft_delete_column() -> Option<Column> {
        Some(asset_columns::IS_DELETED)
    }

    fn relations() -> &'static [&'static str] {
        ASSET_RELATIONS
    }

    fn value(&self, member: &str) -> Value {
        match member {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "assetTag" => self.asset_tag.as_str().into(),
            "serialNumber" => self.serial_number.clone().into(),
            "status" => self.status.as_str().into(),
            "purchaseCost" => self.purchase_cost.into(),
            "purchaseDate" => self.purchase_date_ms.into(),
            "supplierId" => self.supplier_id.into(),
            "manufacturerId" => self.manufacturer_id.into(),
            "locationId" => self.location_id.into(),
            "assignedTo" => self.assigned_to.into(),
            "createdAt" => self.created_at_ms.into(),
            "updatedAt" => self.updated_at_ms.into(),
            "isDeleted" => self.is_deleted.into(),
            _ => Value::Null,
        }
    }
}

impl From<AssetRow> for Asset {
    fn from(row: AssetRow) -> Self {
        let status = AssetStatus::parse(&row.status).unwrap_or_else(|| {
            tracing::warn!(asset_id = %row.id, status = %row.status, "unknown asset status");
            AssetStatus::default()
        });
        Asset {
            id: row.id,
            name: row.name,
            asset_tag: row.asset_tag,
            serial_number: row.serial_number,
            status,
            purchase_cost: row.purchase_cost,
            purchase_date_ms: row.purchase_date_ms,
            supplier_id: row.supplier_id,
            manufacturer_id: row.manufacturer_id,
            location_id: row.location_id,
            assigned_to: row.assigned_to,
            created_at_ms: row.created_at_ms,
            supplier_name: row.supplier_name,
            location_name: row.location_name,
        }
    }
}

/// 资产部分更新。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetUpdate {
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub status: Option<AssetStatus>,
    pub purchase_cost: Option<f64>,
    pub supplier_id: Option<Uuid>,
    pub manufacturer_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
}

/// 供应商表记录。
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierRow {
    pub id: Uuid,
    pub name: String,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub is_deleted: bool,
}

impl SupplierRow {
    pub fn from_domain(supplier: &Supplier, now_ms: i64) -> Self {
        Self {
            id: supplier.id,
            name: supplier.name.trim().to_string(),
            contact_email: supplier.contact_email.clone(),
            phone: supplier.phone.clone(),
            is_active: supplier.is_active,
            created_at_ms: supplier.created_at_ms,
            updated_at_ms: now_ms,
            is_deleted: false,
        }
    }
}

impl StorageEntity for SupplierRow {
    const TABLE: &'static str = "suppliers";

    fn columns() -> &'static [Column] {
        supplier_columns::ALL
    }

    fn id_column() -> Column {
        supplier_columns::ID
    }

    fn default_order() -> &'static [SortKey] {
        supplier_columns::DEFAULT_ORDER
    }

    fn soft_delete_column() -> Option<Column> {
        Some(supplier_columns::IS_DELETED)
    }

    fn value(&self, member: &str) -> Value {
        match member {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "contactEmail" => self.contact_email.clone().into(),
            "phone" => self.phone.clone().into(),
            "isActive" => self.is_active.into(),
            "createdAt" => self.created_at_ms.into(),
            "updatedAt" => self.updated_at_ms.into(),
            "isDeleted" => self.is_deleted.into(),
            _ => Value::Null,
        }
    }
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: row.id,
            name: row.name,
            contact_email: row.contact_email,
            phone: row.phone,
            is_active: row.is_active,
            created_at_ms: row.created_at_ms,
        }
    }
}

/// 制造商表记录。
#[derive(Debug, Clone, PartialEq)]
pub struct ManufacturerRow {
    pub id: Uuid,
    pub name: String,
    pub website: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub is_deleted: bool,
}

impl ManufacturerRow {
    pub fn from_domain(manufacturer: &Manufacturer, now_ms: i64) -> Self {
        Self {
            id: manufacturer.id,
            name: manufacturer.name.trim().to_string(),
            website: manufacturer.website.clone(),
            created_at_ms: manufacturer.created_at_ms,
            updated_at_ms: now_ms,
            is_deleted: false,
        }
    }
}

impl StorageEntity for ManufacturerRow {
    const TABLE: &'static str = "manufacturers";

    fn columns() -> &'static [Column] {
        manufacturer_columns::ALL
    }

    fn id_column() -> Column {
        manufacturer_columns::ID
    }

    fn default_order() -> &'static [SortKey] {
        manufacturer_columns::DEFAULT_ORDER
    }

    fn soft_delete_column() -> Option<Column> {
        Some(manufacturer_columns::IS_DELETED)
    }

    fn value(&self, member: &str) -> Value {
        match member {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "website" => self.website.clone().into(),
            "createdAt" => self.created_at_ms.into(),
            "updatedAt" => self.updated_at_ms.into(),
            "isDeleted" => self.is_deleted.into(),
            _ => Value::Null,
        }
    }
}

impl From<ManufacturerRow> for Manufacturer {
    fn from(row: ManufacturerRow) -> Self {
        Manufacturer {
            id: row.id,
            name: row.name,
            website: row.website,
            created_at_ms: row.created_at_ms,
        }
    }
}

/// 位置表记录。
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRow {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub parent_id: Option<Uuid>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub is_deleted: bool,
}

impl LocationRow {
    pub fn from_domain(location: &Location, now_ms: i64) -> Self {
        Self {
            id: location.id,
            name: location.name.trim().to_string(),
            address: location.address.clone(),
            parent_id: location.parent_id,
            created_at_ms: location.created_at_ms,
            updated_at_ms: now_ms,
            is_deleted: false,
        }
    }
}

impl StorageEntity for LocationRow {
    const TABLE: &'static str = "locations";

    fn columns() -> &'static [Column] {
        location_columns::ALL
    }

    fn id_column() -> Column {
        location_columns::ID
    }

    fn default_order() -> &'static [SortKey] {
        location_columns::DEFAULT_ORDER
    }

    fn soft_delete_column() -> Option<Column> {
        Some(location_columns::IS_DELETED)
    }

    fn value(&self, member: &str) -> Value {
        match member {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "address" => self.address.clone().into(),
            "parentId" => self.parent_id.into(),
            "createdAt" => self.created_at_ms.into(),
            "updatedAt" => self.updated_at_ms.into(),
            "isDeleted" => self.is_deleted.into(),
            _ => Value::Null,
        }
    }
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Location {
            id: row.id,
            name: row.name,
            address: row.address,
            parent_id: row.parent_id,
            created_at_ms: row.created_at_ms,
        }
    }
}

/// 用户表记录。
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub role_id: Option<Uuid>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl UserRow {
    pub fn from_domain(user: &User, now_ms: i64) -> Self {
        Self {
            id: user.id,
            username: user.username.trim().to_string(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            is_active: user.is_active,
            role_id: user.role_id,
            created_at_ms: user.created_at_ms,
            updated_at_ms: now_ms,
        }
    }
}

impl StorageEntity for UserRow {
    const TABLE: &'static str = "users";

    fn columns() -> &'static [Column] {
        user_columns::ALL
    }

    fn id_column() -> Column {
        user_columns::ID
    }

    fn default_order() -> &'static [SortKey] {
        user_columns::DEFAULT_ORDER
    }

    fn value(&self, member: &str) -> Value {
        match member {
            "id" => self.id.into(),
            "username" => self.username.as_str().into(),
            "email" => self.email.as_str().into(),
            "fullName" => self.full_name.as_str().into(),
            "isActive" => self.is_active.into(),
            "roleId" => self.role_id.into(),
            "createdAt" => self.created_at_ms.into(),
            "updatedAt" => self.updated_at_ms.into(),
            _ => Value::Null,
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            full_name: row.full_name,
            is_active: row.is_active,
            role_id: row.role_id,
            created_at_ms: row.created_at_ms,
        }
    }
}

/// 角色表记录。
#[derive(Debug, Clone, PartialEq)]
pub struct RoleRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub rank: i64,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl RoleRow {
    pub fn from_domain(role: &Role, now_ms: i64) -> Self {
        Self {
            id: role.id,
            name: role.name.trim().to_string(),
            description: role.description.clone(),
            rank: role.rank,
            created_at_ms: role.created_at_ms,
            updated_at_ms: now_ms,
        }
    }
}

impl StorageEntity for RoleRow {
    const TABLE: &'static str = "roles";

    fn columns() -> &'static [Column] {
        role_columns::ALL
    }

    fn id_column() -> Column {
        role_columns::ID
    }

    fn default_order() -> &'static [SortKey] {
        role_columns::DEFAULT_ORDER
    }

    fn value(&self, member: &str) -> Value {
        match member {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "description" => self.description.clone().into(),
            "rank" => self.rank.into(),
            "createdAt" => self.created_at_ms.into(),
            "updatedAt" => self.updated_at_ms.into(),
            _ => Value::Null,
        }
    }
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            name: row.name,
            description: row.description,
            rank: row.rank,
            created_at_ms: row.created_at_ms,
        }
    }
}
