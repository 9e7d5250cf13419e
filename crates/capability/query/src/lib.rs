//! # 分页查询引擎
//!
//! 各实体仓储共用的分页查询能力：在存储层完成过滤、排序和分页，返回当前页与匹配总数。
//!
//! ## 组成
//!
//! - [`filter`]：领域实体上的过滤表达式树（`Expr<F>`）与构造辅助
//! - [`mapping`]：存储实体描述（`StorageEntity`/`Column`）与领域字段映射表（`FieldMap`）
//! - [`translate`]：领域条件 → 存储条件的结构化改写
//! - [`sort`]：排序串解析（白名单 + 默认排序 + 主键决胜）
//! - [`page`]：分页坐标与分页结果
//! - [`collection`]：存储集合访问接口（Postgres / 内存实现见 storage 模块）
//! - [`engine`]：分页查询编排（count + data 两次往返）
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use fam_query::{PageRequest, PagedQuery, QueryEngine, field};
//!
//! let engine = QueryEngine::<AssetField, AssetRow>::new()?;
//! let query = PagedQuery::new(PageRequest::new(1, 5)?)
//!     .filter(Some(field(AssetField::Name).starts_with("item-1")))
//!     .sort(Some("-name"));
//! let page: Page<Asset> = engine.execute(&table, query).await?;
//! ```

pub mod collection;
pub mod engine;
pub mod error;
pub mod filter;
pub mod mapping;
pub mod page;
pub mod sort;
pub mod translate;
pub mod value;

pub use collection::{Collection, StorageQuery};
pub use engine::{PagedQuery, QueryEngine};
pub use error::{MappingError, QueryError, TranslationError};
pub use filter::{CompareOp, DomainField, Expr, FieldRef, TextOp, field};
pub use mapping::{Column, FieldMap, StorageEntity};
pub use page::{Page, PageRequest};
pub use sort::{OrderBy, SortDir, SortKey, SortToken, parse_sort, resolve_sort};
pub use translate::{StorageFilter, translate};
pub use value::{FieldKind, Value, compare_values};

pub use tokio_util::sync::CancellationToken;
