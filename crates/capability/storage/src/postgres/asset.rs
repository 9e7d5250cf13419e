//! Postgres 资产存储实现
//!
//! 列表查询走分页查询引擎（`PgTable`），写操作使用参数化 SQL。
//! 资产编号的唯一性由部分唯一索引保证（只约束未删除的行）。

use super::table::{PgEntity, PgTable, Relation, column_list};
use crate::error::StorageError;
use crate::models::{AssetRow, AssetUpdate};
use crate::traits::AssetStore;
use crate::validation::{ensure_non_negative, ensure_required};
use domain::{Asset, AssetField, now_ms};
use fam_query::{CancellationToken, Page, PagedQuery, QueryEngine};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const ASSET_JOINS: &[Relation] = &[
    Relation {
        name: "supplier",
        join: "left join suppliers supplier on supplier.id = assets.supplier_id",
        select: "supplier.name as supplier_name",
    },
    Relation {
        name: "location",
        join: "left join locations location on location.id = assets.location_id",
        select: "location.name as location_name",
    },
];

impl PgEntity for AssetRow {
    fn joins() -> &'static [Relation] {
        ASSET_JOINS
    }

    fn from_row(row: &PgRow, includes: &[&'static str]) -> Result<Self, sqlx::Error> {
        let supplier_name = if includes.contains(&"supplier") {
            row.try_get("supplier_name")?
        } else {
            None
        };
        let location_name = if includes.contains(&"location") {
            row.try_get("location_name")?
        } else {
            None
        };
        Ok(AssetRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            asset_tag: row.try_get("asset_tag")?,
            serial_number: row.try_get("serial_number")?,
            status: row.try_get("status")?,
            purchase_cost: row.try_get("purchase_cost")?,
            purchase_date_ms: row.try_get("purchase_date")?,
            supplier_id: row.try_get("supplier_id")?,
            manufacturer_id: row.try_get("manufacturer_id")?,
            location_id: row.try_get("location_id")?,
            assigned_to: row.try_get("assigned_to")?,
            created_at_ms: row.try_get("created_at")?,
            updated_at_ms: row.try_get("updated_at")?,
            is_deleted: row.try_get("is_deleted")?,
            supplier_name,
            location_name,
        })
    }
}

pub struct PgAssetStore {
    table: PgTable<AssetRow>,
    engine: QueryEngine<AssetField, AssetRow>,
}

impl PgAssetStore {
    pub fn new(pool: PgPool) -> Result<Self, StorageError> {
        Ok(Self {
            table: PgTable::new(pool),
            engine: QueryEngine::new()?,
        })
    }
}

#[async_trait::async_trait]
impl AssetStore for PgAssetStore {
    async fn list_assets(
        &self,
        query: PagedQuery<AssetField>,
        cancel: &CancellationToken,
    ) -> Result<Page<Asset>, StorageError> {
        Ok(self
            .engine
            .execute_with_cancel(&self.table, query, cancel)
            .await?)
    }

    async fn find_asset(&self, asset_id: Uuid) -> Result<Option<Asset>, StorageError> {
        let row = self.table.find(asset_id, &[]).await?;
        Ok(row.map(Asset::from))
    }

    async fn create_asset(&self, asset: Asset) -> Result<Asset, StorageError> {
        ensure_required("name", &asset.name)?;
        ensure_required("assetTag", &asset.asset_tag)?;
        ensure_non_negative("purchaseCost", asset.purchase_cost)?;
        let row = AssetRow::from_domain(&asset, now_ms());
        sqlx::query(
            "insert into assets (id, name, asset_tag, serial_number, status, purchase_cost, \
             purchase_date, supplier_id, manufacturer_id, location_id, assigned_to, \
             created_at, updated_at, is_deleted) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, false)",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.asset_tag)
        .bind(&row.serial_number)
        .bind(&row.status)
        .bind(row.purchase_cost)
        .bind(row.purchase_date_ms)
        .bind(row.supplier_id)
        .bind(row.manufacturer_id)
        .bind(row.location_id)
        .bind(row.assigned_to)
        .bind(row.created_at_ms)
        .bind(row.updated_at_ms)
        .execute(self.table.pool())
        .await?;
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
        let sql = format!(
            "update assets set \
             name = coalesce($1, name), \
             serial_number = coalesce($2, serial_number), \
             status = coalesce($3, status), \
             purchase_cost = coalesce($4, purchase_cost), \
             supplier_id = coalesce($5, supplier_id), \
             manufacturer_id = coalesce($6, manufacturer_id), \
             location_id = coalesce($7, location_id), \
             assigned_to = coalesce($8, assigned_to), \
             updated_at = $9 \
             where id = $10 and is_deleted = false \
             returning {}",
            column_list::<AssetRow>()
        );
        let row = sqlx::query(&sql)
            .bind(update.name.as_deref().map(str::trim))
            .bind(update.serial_number)
            .bind(update.status.map(|status| status.as_str()))
            .bind(update.purchase_cost)
            .bind(update.supplier_id)
            .bind(update.manufacturer_id)
            .bind(update.location_id)
            .bind(update.assigned_to)
            .bind(now_ms())
            .bind(asset_id)
            .fetch_optional(self.table.pool())
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(AssetRow::from_row(&row, &[])?.into()))
    }

    async fn delete_asset(&self, asset_id: Uuid) -> Result<bool, StorageError> {
        self.table.soft_delete(asset_id, now_ms()).await
    }
}
