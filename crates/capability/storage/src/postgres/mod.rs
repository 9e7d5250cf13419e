//! # PostgreSQL 存储实现模块
//!
//! ## 组成
//!
//! - **table** (`table.rs`)：通用表 `PgTable<S>`，把存储条件编译为参数化 SQL，
//!   实现分页查询引擎需要的 count / fetch
//! - **AssetStore** (`asset.rs`)：资产存储，支持预加载供应商与位置名称
//! - **SupplierStore / ManufacturerStore / LocationStore** (`catalog.rs`)
//! - **UserStore / RoleStore** (`directory.rs`)
//!
//! ## 约定
//!
//! - 时间列统一为 epoch 毫秒（bigint）
//! - 带 `is_deleted` 的表只做软删除，查询自动排除已删除行
//! - 名称类唯一约束为部分唯一索引（`where is_deleted = false`），
//!   冲突时返回 `StorageErrorKind::Conflict`
//! - 当前实现不使用事务：每个写操作是单条语句

pub mod asset;
pub mod catalog;
pub mod directory;
pub mod table;

pub use asset::*;
pub use catalog::*;
pub use directory::*;
pub use table::{PgEntity, PgTable, Relation};
