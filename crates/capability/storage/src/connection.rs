//! 数据库连接管理
//!
//! - connect_pool：建立 Postgres 连接池
//! - run_migrations：执行内置建表脚本（幂等）

use crate::error::StorageError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

const INIT_SQL: &str = include_str!("../migrations/0001_init.sql");

/// 建立 Postgres 连接池
///
/// # 参数
/// - `database_url`：Postgres 连接字符串
/// - `max_connections`：连接池上限（配置项 `FAM_DB_MAX_CONNECTIONS`）
pub async fn connect_pool(database_url: &str, max_connections: u32) -> Result<PgPool, StorageError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// 执行建表脚本
///
/// 脚本只使用 `create ... if not exists`，重复执行无副作用。
pub async fn run_migrations(pool: &PgPool) -> Result<(), StorageError> {
    sqlx::raw_sql(INIT_SQL).execute(pool).await?;
    tracing::info!("storage migrations applied");
    Ok(())
}
