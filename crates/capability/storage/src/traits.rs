//! 存储接口 Trait 定义
//!
//! - AssetStore：资产存储
//! - SupplierStore / ManufacturerStore / LocationStore：目录数据存储
//! - UserStore / RoleStore：用户与角色存储
//!
//! 列表接口统一走分页查询引擎：过滤、排序、分页都在存储层完成，
//! 返回当前页与匹配总数。`cancel` 触发时在下一次存储往返前结束。

use crate::error::StorageError;
use crate::models::AssetUpdate;
use async_trait::async_trait;
use domain::{
    Asset, AssetField, Location, LocationField, Manufacturer, ManufacturerField, Role, RoleField,
    Supplier, SupplierField, User, UserField,
};
use fam_query::{CancellationToken, Page, PagedQuery};
use uuid::Uuid;

/// 资产存储接口
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// 分页查询资产
    async fn list_assets(
        &self,
        query: PagedQuery<AssetField>,
        cancel: &CancellationToken,
    ) -> Result<Page<Asset>, StorageError>;

    /// 查找指定资产（已删除的视为不存在）
    async fn find_asset(&self, asset_id: Uuid) -> Result<Option<Asset>, StorageError>;

    /// 创建新资产，资产编号重复时返回冲突
    async fn create_asset(&self, asset: Asset) -> Result<Asset, StorageError>;

    /// 更新资产
    async fn update_asset(
        &self,
        asset_id: Uuid,
        update: AssetUpdate,
    ) -> Result<Option<Asset>, StorageError>;

    /// 删除资产（软删除）
    async fn delete_asset(&self, asset_id: Uuid) -> Result<bool, StorageError>;
}

/// 供应商存储接口
#[async_trait]
pub trait SupplierStore: Send + Sync {
    async fn list_suppliers(
        &self,
        query: PagedQuery<SupplierField>,
        cancel: &CancellationToken,
    ) -> Result<Page<Supplier>, StorageError>;

    async fn find_supplier(&self, supplier_id: Uuid) -> Result<Option<Supplier>, StorageError>;

    async fn create_supplier(&self, supplier: Supplier) -> Result<Supplier, StorageError>;

    /// 软删除
    async fn delete_supplier(&self, supplier_id: Uuid) -> Result<bool, StorageError>;
}

/// 制造商存储接口
#[async_trait]
pub trait ManufacturerStore: Send + Sync {
    async fn list_manufacturers(
        &self,
        query: PagedQuery<ManufacturerField>,
        cancel: &CancellationToken,
    ) -> Result<Page<Manufacturer>, StorageError>;

    async fn find_manufacturer(
        &self,
        manufacturer_id: Uuid,
    ) -> Result<Option<Manufacturer>, StorageError>;

    async fn create_manufacturer(
        &self,
        manufacturer: Manufacturer,
    ) -> Result<Manufacturer, StorageError>;

    /// 软删除
    async fn delete_manufacturer(&self, manufacturer_id: Uuid) -> Result<bool, StorageError>;
}

/// 位置存储接口
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn list_locations(
        &self,
        query: PagedQuery<LocationField>,
        cancel: &CancellationToken,
    ) -> Result<Page<Location>, StorageError>;

    async fn find_location(&self, location_id: Uuid) -> Result<Option<Location>, StorageError>;

    async fn create_location(&self, location: Location) -> Result<Location, StorageError>;

    /// 软删除
    async fn delete_location(&self, location_id: Uuid) -> Result<bool, StorageError>;
}

/// 用户存储接口
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(
        &self,
        query: PagedQuery<UserField>,
        cancel: &CancellationToken,
    ) -> Result<Page<User>, StorageError>;

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, StorageError>;

    /// 创建用户（种子数据与测试使用，HTTP 层不开放）
    async fn create_user(&self, user: User) -> Result<User, StorageError>;
}

/// 角色存储接口
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn list_roles(
        &self,
        query: PagedQuery<RoleField>,
        cancel: &CancellationToken,
    ) -> Result<Page<Role>, StorageError>;

    async fn find_role(&self, role_id: Uuid) -> Result<Option<Role>, StorageError>;

    /// 创建角色（种子数据与测试使用，HTTP 层不开放）
    async fn create_role(&self, role: Role) -> Result<Role, StorageError>;
}
