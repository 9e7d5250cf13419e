//! 资产内存存储实现
//!
//! 仅用于本地演示和测试。资产编号在未删除的资产中唯一。
//!
//! 供应商、制造商、位置、用户表通过 [`AssetReferences`] 与对应的内存存储共享：
//! - 写入时校验引用存在，不存在时与 Postgres 外键违例一样返回输入错误
//! - 预加载 `supplier` / `location` 时在取回一页后回填名称

use super::table::InMemoryTable;
use crate::error::StorageError;
use crate::models::{
    AssetRow, AssetUpdate, LocationRow, ManufacturerRow, SupplierRow, UserRow, asset_columns,
};
use crate::traits::AssetStore;
use crate::validation::{ensure_non_negative, ensure_required};
use async_trait::async_trait;
use domain::{Asset, AssetField, now_ms};
use fam_query::{
    CancellationToken, Collection, Page, PagedQuery, QueryEngine, StorageFilter, StorageQuery,
};
use std::sync::Arc;
use uuid::Uuid;

/// 资产引用的其他内存表
#[derive(Clone, Default)]
pub struct AssetReferences {
    pub suppliers: Arc<InMemoryTable<SupplierRow>>,
    pub manufacturers: Arc<InMemoryTable<ManufacturerRow>>,
    pub locations: Arc<InMemoryTable<LocationRow>>,
    pub users: Arc<InMemoryTable<UserRow>>,
}

pub struct InMemoryAssetStore {
    table: InMemoryTable<AssetRow>,
    references: AssetReferences,
    engine: QueryEngine<AssetField, AssetRow>,
}

impl InMemoryAssetStore {
    /// 使用独立的空引用表
    pub fn new() -> Result<Self, StorageError> {
        Self::with_references(AssetReferences::default())
    }

    pub fn with_references(references: AssetReferences) -> Result<Self, StorageError> {
        Ok(Self {
            table: InMemoryTable::new(),
            references,
            engine: QueryEngine::new()?,
        })
    }

    /// 底层内存表（测试中直接作为查询集合使用）
    pub fn table(&self) -> &InMemoryTable<AssetRow> {
        &self.table
    }

    fn check_references(
        &self,
        supplier_id: Option<Uuid>,
        manufacturer_id: Option<Uuid>,
        location_id: Option<Uuid>,
        assigned_to: Option<Uuid>,
    ) -> Result<(), StorageError> {
        if let Some(id) = supplier_id {
            ensure_exists(&self.references.suppliers, id, "supplier")?;
        }
        if let Some(id) = manufacturer_id {
            ensure_exists(&self.references.manufacturers, id, "manufacturer")?;
        }
        if let Some(id) = location_id {
            ensure_exists(&self.references.locations, id, "location")?;
        }
        if let Some(id) = assigned_to {
            ensure_exists(&self.references.users, id, "assigned user")?;
        }
        Ok(())
    }
}

fn ensure_exists<S: fam_query::StorageEntity>(
    table: &InMemoryTable<S>,
    id: Uuid,
    what: &str,
) -> Result<(), StorageError> {
    match table.lookup(id)? {
        Some(_) => Ok(()),
        None => Err(StorageError::invalid_input(format!("{what} {id} not found"))),
    }
}

/// 带关联回填的资产集合
struct AssetRows<'a> {
    table: &'a InMemoryTable<AssetRow>,
    references: &'a AssetReferences,
}

#[async_trait]
impl<'a> Collection<AssetRow> for AssetRows<'a> {
    type Error = StorageError;

    async fn count(&self, filter: Option<&StorageFilter>) -> Result<u64, StorageError> {
        self.table.count(filter).await
    }

    async fn fetch(&self, query: &StorageQuery) -> Result<Vec<AssetRow>, StorageError> {
        let mut rows = self.table.fetch(query).await?;
        let with_supplier = query.includes("supplier");
        let with_location = query.includes("location");
        for row in &mut rows {
            if with_supplier && let Some(id) = row.supplier_id {
                row.supplier_name = self.references.suppliers.lookup(id)?.map(|s| s.name);
            }
            if with_location && let Some(id) = row.location_id {
                row.location_name = self.references.locations.lookup(id)?.map(|l| l.name);
            }
        }
        Ok(rows)
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn list_assets(
        &self,
        query: PagedQuery<AssetField>,
        cancel: &CancellationToken,
    ) -> Result<Page<Asset>, StorageError> {
        let rows = AssetRows {
            table: &self.table,
            references: &self.references,
        };
        Ok(self.engine.execute_with_cancel(&rows, query, cancel).await?)
    }

    async fn find_asset(&self, asset_id: Uuid) -> Result<Option<Asset>, StorageError> {
        Ok(self.table.find(asset_id)?.map(Asset::from))
    }

    async fn create_asset(&self, asset: Asset) -> Result<Asset, StorageError> {
        ensure_required("name", &asset.name)?;
        ensure_required("assetTag", &asset.asset_tag)?;
        ensure_non_negative("purchaseCost", asset.purchase_cost)?;
        self.check_references(
            asset.supplier_id,
            asset.manufacturer_id,
            asset.location_id,
            asset.assigned_to,
        )?;
        let row = AssetRow::from_domain(&asset, now_ms());
        let row = self.table.insert(row, &[asset_columns::ASSET_TAG])?;
        Ok(row.into())
    }

    async fn update_asset(
        &self,
        asset_id: Uuid,
        update: AssetUpdate,
    ) -> Result<Option<Asset>, StorageError> {
        if let Some(name) = &update.name {
            ensure_required("name", name)?;
        }
        ensure_non_negative("purchaseCost", update.purchase_cost)?;
        self.check_references(
            update.supplier_id,
            update.manufacturer_id,
            update.location_id,
            update.assigned_to,
        )?;
        let now = now_ms();
        let row = self.table.update(asset_id, |row| row.apply(&update, now))?;
        Ok(row.map(Asset::from))
    }

    async fn delete_asset(&self, asset_id: Uuid) -> Result<bool, StorageError> {
        let now = now_ms();
        let row = self.table.update(asset_id, |row| {
            row.is_deleted = true;
            row.updated_at_ms = now;
        })?;
        Ok(row.is_some())
    }
}
