//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers：
//! - 健康检查与计数器：/health, /metrics
//! - 资产：/assets/*
//! - 目录数据：/suppliers/*, /manufacturers/*, /locations/*
//! - 用户与角色（只读）：/users/*, /roles/*

use super::AppState;
use super::handlers::*;
use super::middleware::request_context;
use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

/// 创建 API 路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .route("/assets", get(list_assets).post(create_asset))
        .route(
            "/assets/:asset_id",
            get(get_asset).put(update_asset).delete(delete_asset),
        )
        .route("/suppliers", get(list_suppliers).post(create_supplier))
        .route(
            "/suppliers/:supplier_id",
            get(get_supplier).delete(delete_supplier),
        )
        .route(
            "/manufacturers",
            get(list_manufacturers).post(create_manufacturer),
        )
        .route(
            "/manufacturers/:manufacturer_id",
            get(get_manufacturer).delete(delete_manufacturer),
        )
        .route("/locations", get(list_locations).post(create_location))
        .route(
            "/locations/:location_id",
            get(get_location).delete(delete_location),
        )
        .route("/users", get(list_users))
        .route("/users/:user_id", get(get_user))
        .route("/roles", get(list_roles))
        .route("/roles/:role_id", get(get_role))
}

/// 挂载完整应用：同一组路由同时支持 / 和 /api/ 两种前缀
pub fn create_router(state: AppState) -> Router {
    let api = create_api_router();
    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_context))
}
