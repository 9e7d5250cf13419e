//! 固定资产管理 HTTP API。
//!
//! 启动流程：加载 .env 与环境变量配置 → 初始化 tracing → 按配置选择
//! Postgres 或内存存储 → 挂载路由（`/` 与 `/api` 两种前缀）→ 监听并在
//! Ctrl-C 时优雅退出。

mod handlers;
mod middleware;
mod routes;
mod utils;

use fam_config::{AppConfig, StorageBackend};
use fam_query::CancellationToken;
use fam_storage::{
    AssetReferences, AssetStore, InMemoryAssetStore, InMemoryLocationStore, InMemoryManufacturerStore,
    InMemoryRoleStore, InMemorySupplierStore, InMemoryUserStore, LocationStore,
    ManufacturerStore, PgAssetStore, PgLocationStore, PgManufacturerStore, PgRoleStore,
    PgSupplierStore, PgUserStore, RoleStore, StorageError, SupplierStore, UserStore,
    connect_pool, run_migrations,
};
use fam_telemetry::init_tracing;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};

/// 应用共享状态
#[derive(Clone)]
pub struct AppState {
    pub asset_store: Arc<dyn AssetStore>,
    pub supplier_store: Arc<dyn SupplierStore>,
    pub manufacturer_store: Arc<dyn ManufacturerStore>,
    pub location_store: Arc<dyn LocationStore>,
    pub user_store: Arc<dyn UserStore>,
    pub role_store: Arc<dyn RoleStore>,
    /// 未传 pageSize 时使用
    pub default_page_size: u32,
    pub max_page_size: u32,
    /// 进程退出时取消，进行中的分页查询随之结束
    pub shutdown: CancellationToken,
}

impl AppState {
    /// 内存存储（本地演示与测试）
    ///
    /// 资产存储与目录、用户存储共享底层表，用于引用校验和关联回填。
    pub fn in_memory(config: &AppConfig) -> Result<Self, StorageError> {
        let suppliers = InMemorySupplierStore::new()?;
        let manufacturers = InMemoryManufacturerStore::new()?;
        let locations = InMemoryLocationStore::new()?;
        let users = InMemoryUserStore::new()?;
        let assets = InMemoryAssetStore::with_references(AssetReferences {
            suppliers: suppliers.table(),
            manufacturers: manufacturers.table(),
            locations: locations.table(),
            users: users.table(),
        })?;
        Ok(Self {
            asset_store: Arc::new(assets),
            supplier_store: Arc::new(suppliers),
            manufacturer_store: Arc::new(manufacturers),
            location_store: Arc::new(locations),
            user_store: Arc::new(users),
            role_store: Arc::new(InMemoryRoleStore::new()?),
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
            shutdown: CancellationToken::new(),
        })
    }

    /// Postgres 存储，所有仓储共用一个连接池
    pub fn postgres(pool: PgPool, config: &AppConfig) -> Result<Self, StorageError> {
        Ok(Self {
            asset_store: Arc::new(PgAssetStore::new(pool.clone())?),
            supplier_store: Arc::new(PgSupplierStore::new(pool.clone())?),
            manufacturer_store: Arc::new(PgManufacturerStore::new(pool.clone())?),
            location_store: Arc::new(PgLocationStore::new(pool.clone())?),
            user_store: Arc::new(PgUserStore::new(pool.clone())?),
            role_store: Arc::new(PgRoleStore::new(pool)?),
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
            shutdown: CancellationToken::new(),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let state = match config.storage {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or("FAM_DATABASE_URL required for postgres storage")?;
            let pool = connect_pool(database_url, config.db_max_connections).await?;
            if config.run_migrations {
                run_migrations(&pool).await?;
            }
            AppState::postgres(pool, &config)?
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage, data is lost on restart");
            AppState::in_memory(&config)?
        }
    };

    let shutdown = state.shutdown.clone();
    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(addr = %config.http_addr, "fam-api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
    shutdown.cancel();
}

#[cfg(test)]
mod test_support {
    use super::AppState;
    use axum::response::Response;
    use fam_config::AppConfig;
    use http_body_util::BodyExt;

    pub fn memory_state() -> AppState {
        AppState::in_memory(&AppConfig::default()).expect("state")
    }

    pub async fn body_json(response: Response) -> serde_json::Value {
        let bytes: bytes::Bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_json, memory_state};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use domain::Asset;
    use tower::ServiceExt;

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[tokio::test]
    async fn routes_are_served_under_both_prefixes() {
        let state = memory_state();
        state
            .asset_store
            .create_asset(Asset::new("Laptop", "TAG-1", 1))
            .await
            .expect("seed");
        let app = routes::create_router(state);

        for uri in ["/assets?page=1&pageSize=5", "/api/assets?page=1&page_size=5"] {
            let response = app.clone().oneshot(get(uri)).await.expect("response");
            assert_eq!(response.status(), StatusCode::OK);
            assert!(response.headers().contains_key("x-request-id"));
            assert!(response.headers().contains_key("x-trace-id"));
            let body = body_json(response).await;
            assert_eq!(body["success"], true);
            assert_eq!(body["data"]["pageSize"], 5);
            assert_eq!(body["data"]["items"][0]["assetTag"], "TAG-1");
        }
    }

    #[tokio::test]
    async fn invalid_page_coordinates_are_rejected() {
        let app = routes::create_router(memory_state());
        for uri in [
            "/assets?page=0",
            "/suppliers?pageSize=0",
            "/roles?pageSize=101",
        ] {
            let response = app.clone().oneshot(get(uri)).await.expect("response");
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            let body = body_json(response).await;
            assert_eq!(body["error"]["code"], "INVALID.REQUEST");
        }
    }

    #[tokio::test]
    async fn unknown_sort_falls_back_to_default_order() {
        let state = memory_state();
        for (index, name) in ["b", "a", "c"].into_iter().enumerate() {
            let asset = Asset::new(name, format!("TAG-{index}"), index as i64);
            state.asset_store.create_asset(asset).await.expect("seed");
        }
        let app = routes::create_router(state);
        let response = app
            .oneshot(get("/api/assets?sort=colour"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let names: Vec<&str> = body["data"]["items"]
            .as_array()
            .expect("items")
            .iter()
            .map(|item| item["name"].as_str().expect("name"))
            .collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[tokio::test]
    async fn create_then_fetch_over_http() {
        let app = routes::create_router(memory_state());
        let request = Request::builder()
            .method("POST")
            .uri("/api/manufacturers")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Lenovo","website":"https://lenovo.com"}"#))
            .expect("request");
        let response = app.clone().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let id = body["data"]["id"].as_str().expect("id").to_string();

        let response = app
            .clone()
            .oneshot(get(&format!("/manufacturers/{id}")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["website"], "https://lenovo.com");

        let response = app
            .oneshot(get(&format!("/manufacturers/{}", uuid::Uuid::new_v4())))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn shutdown_cancels_list_queries() {
        let state = memory_state();
        state.shutdown.cancel();
        let app = routes::create_router(state);
        let response = app.oneshot(get("/users")).await.expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "REQUEST.CANCELLED");
    }

    #[tokio::test]
    async fn health_and_metrics() {
        let app = routes::create_router(memory_state());
        let response = app.clone().oneshot(get("/health")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        app.clone()
            .oneshot(get("/api/roles"))
            .await
            .expect("response");
        let response = app.oneshot(get("/api/metrics")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["data"]["pagedQueries"].as_u64().expect("counter") >= 1);
    }
}
