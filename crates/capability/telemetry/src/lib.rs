//! 追踪初始化、请求 ID 与查询计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 查询计数快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub paged_queries: u64,
    pub translation_failures: u64,
    pub skipped_sort_fields: u64,
    pub default_orderings: u64,
    pub cancelled_queries: u64,
}

/// 查询计数器。
#[derive(Default)]
pub struct TelemetryMetrics {
    paged_queries: AtomicU64,
    translation_failures: AtomicU64,
    skipped_sort_fields: AtomicU64,
    default_orderings: AtomicU64,
    cancelled_queries: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            paged_queries: self.paged_queries.load(Ordering::Relaxed),
            translation_failures: self.translation_failures.load(Ordering::Relaxed),
            skipped_sort_fields: self.skipped_sort_fields.load(Ordering::Relaxed),
            default_orderings: self.default_orderings.load(Ordering::Relaxed),
            cancelled_queries: self.cancelled_queries.load(Ordering::Relaxed),
        }
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数器实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录分页查询次数。
pub fn record_paged_query() {
    metrics().paged_queries.fetch_add(1, Ordering::Relaxed);
}

/// 记录过滤条件翻译失败次数。
pub fn record_translation_failure() {
    metrics()
        .translation_failures
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录被跳过的排序成员个数。
pub fn record_skipped_sort_field() {
    metrics()
        .skipped_sort_fields
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录回退到默认排序的次数。
pub fn record_default_ordering() {
    metrics().default_orderings.fetch_add(1, Ordering::Relaxed);
}

/// 记录被取消的查询次数。
pub fn record_cancelled_query() {
    metrics().cancelled_queries.fetch_add(1, Ordering::Relaxed);
}
