//! Postgres 目录数据存储实现（供应商、制造商、位置）

use super::table::{PgEntity, PgTable};
use crate::error::StorageError;
use crate::models::{LocationRow, ManufacturerRow, SupplierRow};
use crate::traits::{LocationStore, ManufacturerStore, SupplierStore};
use crate::validation::ensure_required;
use domain::{
    Location, LocationField, Manufacturer, ManufacturerField, Supplier, SupplierField, now_ms,
};
use fam_query::{CancellationToken, Page, PagedQuery, QueryEngine};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

impl PgEntity for SupplierRow {
    fn from_row(row: &PgRow, _includes: &[&'static str]) -> Result<Self, sqlx::Error> {
        Ok(SupplierRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            contact_email: row.try_get("contact_email")?,
            phone: row.try_get("phone")?,
            is_active: row.try_get("is_active")?,
            created_at_ms: row.try_get("created_at")?,
            updated_at_ms: row.try_get("updated_at")?,
            is_deleted: row.try_get("is_deleted")?,
        })
    }
}

impl PgEntity for ManufacturerRow {
    fn from_row(row: &PgRow, _includes: &[&'static str]) -> Result<Self, sqlx::Error> {
        Ok(ManufacturerRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            website: row.try_get("website")?,
            created_at_ms: row.try_get("created_at")?,
            updated_at_ms: row.try_get("updated_at")?,
            is_deleted: row.try_get("is_deleted")?,
        })
    }
}

impl PgEntity for LocationRow {
    fn from_row(row: &PgRow, _includes: &[&'static str]) -> Result<Self, sqlx::Error> {
        Ok(LocationRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            parent_id: row.try_get("parent_id")?,
            created_at_ms: row.try_get("created_at")?,
            updated_at_ms: row.try_get("updated_at")?,
            is_deleted: row.try_get("is_deleted")?,
        })
    }
}

pub struct PgSupplierStore {
    table: PgTable<SupplierRow>,
    engine: QueryEngine<SupplierField, SupplierRow>,
}

impl PgSupplierStore {
    pub fn new(pool: PgPool) -> Result<Self, StorageError> {
        Ok(Self {
            table: PgTable::new(pool),
            engine: QueryEngine::new()?,
        })
    }
}

#[async_trait::async_trait]
impl SupplierStore for PgSupplierStore {
    async fn list_suppliers(
        &self,
        query: PagedQuery<SupplierField>,
        cancel: &CancellationToken,
    ) -> Result<Page<Supplier>, StorageError> {
        Ok(self
            .engine
            .execute_with_cancel(&self.table, query, cancel)
            .await?)
    }

    async fn find_supplier(&self, supplier_id: Uuid) -> Result<Option<Supplier>, StorageError> {
        Ok(self.table.find(supplier_id, &[]).await?.map(Supplier::from))
    }

    async fn create_supplier(&self, supplier: Supplier) -> Result<Supplier, StorageError> {
        ensure_required("name", &supplier.name)?;
        let row = SupplierRow::from_domain(&supplier, now_ms());
        sqlx::query(
            "insert into suppliers (id, name, contact_email, phone, is_active, \
             created_at, updated_at, is_deleted) \
             values ($1, $2, $3, $4, $5, $6, $7, false)",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.contact_email)
        .bind(&row.phone)
        .bind(row.is_active)
        .bind(row.created_at_ms)
        .bind(row.updated_at_ms)
        .execute(self.table.pool())
        .await?;
        Ok(row.into())
    }

    async fn delete_supplier(&self, supplier_id: Uuid) -> Result<bool, StorageError> {
        self.table.soft_delete(supplier_id, now_ms()).await
    }
}

pub struct PgManufacturerStore {
    table: PgTable<ManufacturerRow>,
    engine: QueryEngine<ManufacturerField, ManufacturerRow>,
}

impl PgManufacturerStore {
    pub fn new(pool: PgPool) -> Result<Self, StorageError> {
        Ok(Self {
            table: PgTable::new(pool),
            engine: QueryEngine::new()?,
        })
    }
}

#[async_trait::async_trait]
impl ManufacturerStore for PgManufacturerStore {
    async fn list_manufacturers(
        &self,
        query: PagedQuery<ManufacturerField>,
        cancel: &CancellationToken,
    ) -> Result<Page<Manufacturer>, StorageError> {
        Ok(self
            .engine
            .execute_with_cancel(&self.table, query, cancel)
            .await?)
    }

    async fn find_manufacturer(
        &self,
        manufacturer_id: Uuid,
    ) -> Result<Option<Manufacturer>, StorageError> {
        Ok(self
            .table
            .find(manufacturer_id, &[])
            .await?
            .map(Manufacturer::from))
    }

    async fn create_manufacturer(
        &self,
        manufacturer: Manufacturer,
    ) -> Result<Manufacturer, StorageError> {
        ensure_required("name", &manufacturer.name)?;
        let row = ManufacturerRow::from_domain(&manufacturer, now_ms());
        sqlx::query(
            "insert into manufacturers (id, name, website, created_at, updated_at, is_deleted) \
             values ($1, $2, $3, $4, $5, false)",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.website)
        .bind(row.created_at_ms)
        .bind(row.updated_at_ms)
        .execute(self.table.pool())
        .await?;
        Ok(row.into())
    }

    async fn delete_manufacturer(&self, manufacturer_id: Uuid) -> Result<bool, StorageError> {
        self.table.soft_delete(manufacturer_id, now_ms()).await
    }
}

pub struct PgLocationStore {
    table: PgTable<LocationRow>,
    engine: QueryEngine<LocationField, LocationRow>,
}

impl PgLocationStore {
    pub fn new(pool: PgPool) -> Result<Self, StorageError> {
        Ok(Self {
            table: PgTable::new(pool),
            engine: QueryEngine::new()?,
        })
    }
}

#[async_trait::async_trait]
impl LocationStore for PgLocationStore {
    async fn list_locations(
        &self,
        query: PagedQuery<LocationField>,
        cancel: &CancellationToken,
    ) -> Result<Page<Location>, StorageError> {
        Ok(self
            .engine
            .execute_with_cancel(&self.table, query, cancel)
            .await?)
    }

    async fn find_location(&self, location_id: Uuid) -> Result<Option<Location>, StorageError> {
        Ok(self.table.find(location_id, &[]).await?.map(Location::from))
    }

    async fn create_location(&self, location: Location) -> Result<Location, StorageError> {
        ensure_required("name", &location.name)?;
        if let Some(parent_id) = location.parent_id {
            if self.table.find(parent_id, &[]).await?.is_none() {
                return Err(StorageError::invalid_input("parent location not found"));
            }
        }
        let row = LocationRow::from_domain(&location, now_ms());
        sqlx::query(
            "insert into locations (id, name, address, parent_id, created_at, updated_at, is_deleted) \
             values ($1, $2, $3, $4, $5, $6, false)",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.address)
        .bind(row.parent_id)
        .bind(row.created_at_ms)
        .bind(row.updated_at_ms)
        .execute(self.table.pool())
        .await?;
        Ok(row.into())
    }

    async fn delete_location(&self, location_id: Uuid) -> Result<bool, StorageError> {
        self.table.soft_delete(location_id, now_ms()).await
    }
}
