//! 目录数据内存存储实现（供应商、制造商、位置）
//!
//! 名称在未删除的记录中唯一；删除均为软删除。

use super::table::InMemoryTable;
use crate::error::StorageError;
use crate::models::{
    LocationRow, ManufacturerRow, SupplierRow, location_columns, manufacturer_columns,
    supplier_columns,
};
use crate::traits::{LocationStore, ManufacturerStore, SupplierStore};
use crate::validation::ensure_required;
use domain::{
    Location, LocationField, Manufacturer, ManufacturerField, Supplier, SupplierField, now_ms,
};
use fam_query::{CancellationToken, Page, PagedQuery, QueryEngine};
use std::sync::Arc;
use uuid::Uuid;

pub struct InMemorySupplierStore {
    table: Arc<InMemoryTable<SupplierRow>>,
    engine: QueryEngine<SupplierField, SupplierRow>,
}

impl InMemorySupplierStore {
    pub fn new() -> Result<Self, StorageError> {
        Ok(Self {
            table: Arc::default(),
            engine: QueryEngine::new()?,
        })
    }

    /// 共享的底层表（资产存储据此校验引用与回填名称）
    pub fn table(&self) -> Arc<InMemoryTable<SupplierRow>> {
        self.table.clone()
    }
}

#[async_trait::async_trait]
impl SupplierStore for InMemorySupplierStore {
    async fn list_suppliers(
        &self,
        query: PagedQuery<SupplierField>,
        cancel: &CancellationToken,
    ) -> Result<Page<Supplier>, StorageError> {
        Ok(self
            .engine
            .execute_with_cancel(self.table.as_ref(), query, cancel)
            .await?)
    }

    async fn find_supplier(&self, supplier_id: Uuid) -> Result<Option<Supplier>, StorageError> {
        Ok(self.table.find(supplier_id)?.map(Supplier::from))
    }

    async fn create_supplier(&self, supplier: Supplier) -> Result<Supplier, StorageError> {
        ensure_required("name", &supplier.name)?;
        let row = SupplierRow::from_domain(&supplier, now_ms());
        Ok(self.table.insert(row, &[supplier_columns::NAME])?.into())
    }

    async fn delete_supplier(&self, supplier_id: Uuid) -> Result<bool, StorageError> {
        let now = now_ms();
        let row = self.table.update(supplier_id, |row| {
            row.is_deleted = true;
            row.updated_at_ms = now;
        })?;
        Ok(row.is_some())
    }
}

pub struct InMemoryManufacturerStore {
    table: Arc<InMemoryTable<ManufacturerRow>>,
    engine: QueryEngine<ManufacturerField, ManufacturerRow>,
}

impl InMemoryManufacturerStore {
    pub fn new() -> Result<Self, StorageError> {
        Ok(Self {
            table: Arc::default(),
            engine: QueryEngine::new()?,
        })
    }

    /// 共享的底层表（资产存储据此校验引用）
    pub fn table(&self) -> Arc<InMemoryTable<ManufacturerRow>> {
        self.table.clone()
    }
}

#[async_trait::async_trait]
impl ManufacturerStore for InMemoryManufacturerStore {
    async fn list_manufacturers(
        &self,
        query: PagedQuery<ManufacturerField>,
        cancel: &CancellationToken,
    ) -> Result<Page<Manufacturer>, StorageError> {
        Ok(self
            .engine
            .execute_with_cancel(self.table.as_ref(), query, cancel)
            .await?)
    }

    async fn find_manufacturer(
        &self,
        manufacturer_id: Uuid,
    ) -> Result<Option<Manufacturer>, StorageError> {
        Ok(self.table.find(manufacturer_id)?.map(Manufacturer::from))
    }

    async fn create_manufacturer(
        &self,
        manufacturer: Manufacturer,
    ) -> Result<Manufacturer, StorageError> {
        ensure_required("name", &manufacturer.name)?;
        let row = ManufacturerRow::from_domain(&manufacturer, now_ms());
        Ok(self.table.insert(row, &[manufacturer_columns::NAME])?.into())
    }

    async fn delete_manufacturer(&self, manufacturer_id: Uuid) -> Result<bool, StorageError> {
        let now = now_ms();
        let row = self.table.update(manufacturer_id, |row| {
            row.is_deleted = true;
            row.updated_at_ms = now;
        })?;
        Ok(row.is_some())
    }
}

pub struct InMemoryLocationStore {
    table: Arc<InMemoryTable<LocationRow>>,
    engine: QueryEngine<LocationField, LocationRow>,
}

impl InMemoryLocationStore {
    pub fn new() -> Result<Self, StorageError> {
        Ok(Self {
            table: Arc::default(),
            engine: QueryEngine::new()?,
        })
    }

    /// 共享的底层表（资产存储据此校验引用与回填名称）
    pub fn table(&self) -> Arc<InMemoryTable<LocationRow>> {
        self.table.clone()
    }
}

#[async_trait::async_trait]
impl LocationStore for InMemoryLocationStore {
    async fn list_locations(
        &self,
        query: PagedQuery<LocationField>,
        cancel: &CancellationToken,
    ) -> Result<Page<Location>, StorageError> {
        Ok(self
            .engine
            .execute_with_cancel(self.table.as_ref(), query, cancel)
            .await?)
    }

    async fn find_location(&self, location_id: Uuid) -> Result<Option<Location>, StorageError> {
        Ok(self.table.find(location_id)?.map(Location::from))
    }

    async fn create_location(&self, location: Location) -> Result<Location, StorageError> {
        ensure_required("name", &location.name)?;
        if let Some(parent_id) = location.parent_id
            && self.table.find(parent_id)?.is_none()
        {
            return Err(StorageError::invalid_input("parent location not found"));
        }
        let row = LocationRow::from_domain(&location, now_ms());
        Ok(self.table.insert(row, &[location_columns::NAME])?.into())
    }

    async fn delete_location(&self, location_id: Uuid) -> Result<bool, StorageError> {
        let now = now_ms();
        let row = self.table.update(location_id, |row| {
            row.is_deleted = true;
            row.updated_at_ms = now;
        })?;
        Ok(row.is_some())
    }
}
