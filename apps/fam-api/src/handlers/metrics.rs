//! 查询计数器快照
//!
//! - GET /metrics

use api_contract::{ApiResponse, MetricsSnapshotDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fam_telemetry::metrics;

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    (
        StatusCode::OK,
        Json(ApiResponse::success(MetricsSnapshotDto {
            paged_queries: snapshot.paged_queries,
            translation_failures: snapshot.translation_failures,
            skipped_sort_fields: snapshot.skipped_sort_fields,
            default_orderings: snapshot.default_orderings,
            cancelled_queries: snapshot.cancelled_queries,
        })),
    )
        .into_response()
}
