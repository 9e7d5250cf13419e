//! 分页查询编排
//!
//! 执行流程：
//! 1. 翻译过滤条件、解析排序、校验预加载（纯计算，不触达存储）
//! 2. count 查询得到 total
//! 3. data 查询按排序 + skip/take 取回当前页，并映射为领域实体
//!
//! 两次存储往返顺序执行；每次往返都与取消信号竞争。

use crate::collection::{Collection, StorageQuery};
use crate::error::{MappingError, QueryError};
use crate::filter::{DomainField, Expr};
use crate::mapping::{FieldMap, StorageEntity};
use crate::page::{Page, PageRequest};
use crate::sort::resolve_sort;
use crate::translate::translate;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// 分页查询参数。
#[derive(Debug, Clone, PartialEq)]
pub struct PagedQuery<F> {
    filter: Option<Expr<F>>,
    sort: Option<String>,
    page: PageRequest,
    includes: Vec<String>,
}

impl<F> PagedQuery<F> {
    pub fn new(page: PageRequest) -> Self {
        Self {
            filter: None,
            sort: None,
            page,
            includes: Vec::new(),
        }
    }

    pub fn filter(mut self, filter: Option<Expr<F>>) -> Self {
        self.filter = filter;
        self
    }

    pub fn sort(mut self, sort: Option<impl Into<String>>) -> Self {
        self.sort = sort.map(Into::into);
        self
    }

    pub fn include(mut self, relation: impl Into<String>) -> Self {
        self.includes.push(relation.into());
        self
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    pub fn filter_expr(&self) -> Option<&Expr<F>> {
        self.filter.as_ref()
    }

    pub fn sort_spec(&self) -> Option<&str> {
        self.sort.as_deref()
    }
}

/// 单个实体对的分页查询引擎。
///
/// 持有启动时构建的字段映射表；本身无状态，可在并发请求间共享。
pub struct QueryEngine<F: DomainField, S: StorageEntity> {
    fields: FieldMap<F, S>,
}

impl<F: DomainField, S: StorageEntity> QueryEngine<F, S> {
    pub fn new() -> Result<Self, MappingError> {
        Ok(Self {
            fields: FieldMap::by_name()?,
        })
    }

    pub fn fields(&self) -> &FieldMap<F, S> {
        &self.fields
    }

    /// 生成数据查询（过滤、排序、分页、预加载），不访问存储。
    pub fn plan(&self, query: &PagedQuery<F>) -> Result<StorageQuery, QueryError> {
        let filter = match &query.filter {
            Some(filter) => Some(translate(filter, &self.fields).inspect_err(|err| {
                fam_telemetry::record_translation_failure();
                tracing::debug!(table = S::TABLE, error = %err, "filter translation failed");
            })?),
            None => None,
        };
        let mut includes = Vec::with_capacity(query.includes.len());
        for name in &query.includes {
            let relation = S::relations()
                .iter()
                .find(|relation| relation.eq_ignore_ascii_case(name.trim()))
                .ok_or_else(|| QueryError::UnknownInclude(name.clone()))?;
            if !includes.contains(relation) {
                includes.push(*relation);
            }
        }
        let order = resolve_sort::<S>(query.sort.as_deref());
        Ok(StorageQuery {
            filter,
            order: order.into_keys(),
            skip: query.page.skip(),
            take: query.page.take(),
            includes,
        })
    }

    /// 执行分页查询。
    pub async fn execute<D, C>(&self, collection: &C, query: PagedQuery<F>) -> Result<Page<D>, QueryError>
    where
        C: Collection<S> + ?Sized,
        D: From<S>,
    {
        self.execute_with_cancel(collection, query, &CancellationToken::new())
            .await
    }

    /// 执行分页查询，调用方放弃请求时可通过 `cancel` 提前结束。
    pub async fn execute_with_cancel<D, C>(
        &self,
        collection: &C,
        query: PagedQuery<F>,
        cancel: &CancellationToken,
    ) -> Result<Page<D>, QueryError>
    where
        C: Collection<S> + ?Sized,
        D: From<S>,
    {
        fam_telemetry::record_paged_query();
        let plan = self.plan(&query)?;

        let total = run(cancel, collection.count(plan.filter.as_ref())).await?;
        let rows = run(cancel, collection.fetch(&plan)).await?;

        tracing::debug!(
            table = S::TABLE,
            page = query.page.page(),
            page_size = query.page.page_size(),
            returned = rows.len(),
            total,
            "paged query"
        );

        Ok(Page {
            items: rows.into_iter().map(D::from).collect(),
            total,
            page: query.page.page(),
            page_size: query.page.page_size(),
        })
    }
}

async fn run<T, E>(
    cancel: &CancellationToken,
    round_trip: impl Future<Output = Result<T, E>>,
) -> Result<T, QueryError>
where
    E: std::error::Error + Send + Sync + 'static,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            fam_telemetry::record_cancelled_query();
            Err(QueryError::Cancelled)
        }
        result = round_trip => result.map_err(QueryError::storage),
    }
}
