//! 资产

use uuid::Uuid;

/// 资产状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssetStatus {
    #[default]
    Available,
    InUse,
    InRepair,
    Retired,
    Disposed,
}

impl AssetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Available => "available",
            AssetStatus::InUse => "in_use",
            AssetStatus::InRepair => "in_repair",
            AssetStatus::Retired => "retired",
            AssetStatus::Disposed => "disposed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Some(AssetStatus::Available),
            "in_use" | "inuse" => Some(AssetStatus::InUse),
            "in_repair" | "inrepair" => Some(AssetStatus::InRepair),
            "retired" => Some(AssetStatus::Retired),
            "disposed" => Some(AssetStatus::Disposed),
            _ => None,
        }
    }
}

/// 固定资产。
///
/// `supplier_name` / `location_name` 仅在预加载关联时填充，没有对应的存储成员。
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    pub asset_tag: String,
    pub serial_number: Option<String>,
    pub status: AssetStatus,
    pub purchase_cost: Option<f64>,
    pub purchase_date_ms: Option<i64>,
    pub supplier_id: Option<Uuid>,
    pub manufacturer_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub assigned_to: Option<Uuid>,
    pub created_at_ms: i64,
    pub supplier_name: Option<String>,
    pub location_name: Option<String>,
}

impl Asset {
    /// 新建资产（生成 ID，状态为 available）。
    pub fn new(name: impl Into<String>, asset_tag: impl Into<String>, created_at_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            asset_tag: asset_tag.into(),
            serial_number: None,
            status: AssetStatus::Available,
            purchase_cost: None,
            purchase_date_ms: None,
            supplier_id: None,
            manufacturer_id: None,
            location_id: None,
            assigned_to: None,
            created_at_ms,
            supplier_name: None,
            location_name: None,
        }
    }
}

domain_fields! {
    /// 资产字段。
    AssetField for "Asset" {
        Id => ("id", Uuid),
        Name => ("name", String),
        AssetTag => ("assetTag", String),
        SerialNumber => ("serialNumber", String),
        Status => ("status", String),
        PurchaseCost => ("purchaseCost", F64),
        PurchaseDate => ("purchaseDate", I64),
        SupplierId => ("supplierId", Uuid),
        ManufacturerId => ("manufacturerId", Uuid),
        LocationId => ("locationId", Uuid),
        AssignedTo => ("assignedTo", Uuid),
        CreatedAt => ("createdAt", I64),
        SupplierName => ("supplierName", String),
        LocationName => ("locationName", String),
    }
}
