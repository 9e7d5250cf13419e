//! 存储集合访问接口
//!
//! 分页查询只依赖这一个存储接口：给定存储实体类型，
//! 支持 where / order by / skip / take / count / include 六种操作。
//! Postgres 与内存实现位于 storage 模块。

use crate::mapping::StorageEntity;
use crate::sort::SortKey;
use crate::translate::StorageFilter;
use async_trait::async_trait;

/// 一次数据查询的完整描述。
#[derive(Debug, Clone, PartialEq)]
pub struct StorageQuery {
    pub filter: Option<StorageFilter>,
    pub order: Vec<SortKey>,
    pub skip: u64,
    pub take: u64,
    /// 预加载的关联（已按实体声明校验）
    pub includes: Vec<&'static str>,
}

impl StorageQuery {
    pub fn includes(&self, relation: &str) -> bool {
        self.includes.iter().any(|name| *name == relation)
    }
}

/// 存储集合。
#[async_trait]
pub trait Collection<S: StorageEntity>: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 统计匹配过滤条件的行数（忽略分页）
    async fn count(&self, filter: Option<&StorageFilter>) -> Result<u64, Self::Error>;

    /// 按过滤、排序、分页取回一页数据
    async fn fetch(&self, query: &StorageQuery) -> Result<Vec<S>, Self::Error>;
}
