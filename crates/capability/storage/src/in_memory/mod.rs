//! 内存存储实现模块
//!
//! 仅用于本地演示和测试，查询语义与 Postgres 实现保持一致。
//!
//! - table：通用内存表（实现分页查询的存储集合接口）
//! - AssetStore: InMemoryAssetStore
//! - SupplierStore / ManufacturerStore / LocationStore: 对应的 InMemory* 实现
//! - UserStore / RoleStore: InMemoryUserStore / InMemoryRoleStore

pub mod asset;
pub mod catalog;
pub mod directory;
pub mod table;

pub use asset::*;
pub use catalog::*;
pub use directory::*;
pub use table::InMemoryTable;
