//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 存储后端。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl StorageBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Some(StorageBackend::Postgres),
            "memory" | "in-memory" => Some(StorageBackend::Memory),
            _ => None,
        }
    }
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub run_migrations: bool,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr = env::var("FAM_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let storage = match env::var("FAM_STORAGE") {
            Ok(value) => StorageBackend::parse(&value)
                .ok_or_else(|| ConfigError::Invalid("FAM_STORAGE".to_string(), value))?,
            Err(_) => StorageBackend::Postgres,
        };
        let database_url = read_optional("FAM_DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("FAM_DATABASE_URL".to_string()));
        }
        let db_max_connections = read_u32_with_default("FAM_DB_MAX_CONNECTIONS", 8)?;
        let run_migrations = read_bool_with_default("FAM_RUN_MIGRATIONS", false);
        let default_page_size = read_u32_with_default("FAM_DEFAULT_PAGE_SIZE", 20)?;
        let max_page_size = read_u32_with_default("FAM_MAX_PAGE_SIZE", 100)?;
        check_page_sizes(default_page_size, max_page_size)?;

        Ok(Self {
            http_addr,
            storage,
            database_url,
            db_max_connections,
            run_migrations,
            default_page_size,
            max_page_size,
        })
    }
}

impl Default for AppConfig {
    /// 内存存储配置（仅用于测试或本地演示）。
    fn default() -> Self {
        Self {
            http_addr: "127.0.0.1:8080".to_string(),
            storage: StorageBackend::Memory,
            database_url: None,
            db_max_connections: 8,
            run_migrations: false,
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

fn check_page_sizes(default_page_size: u32, max_page_size: u32) -> Result<(), ConfigError> {
    if default_page_size == 0 || default_page_size > max_page_size {
        return Err(ConfigError::Invalid(
            "FAM_DEFAULT_PAGE_SIZE".to_string(),
            format!("{default_page_size} (max {max_page_size})"),
        ));
    }
    Ok(())
}

fn read_u32_with_default(key: &str, default: u32) -> Result<u32, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_backend_parse() {
        assert_eq!(StorageBackend::parse("Postgres"), Some(StorageBackend::Postgres));
        assert_eq!(StorageBackend::parse(" memory "), Some(StorageBackend::Memory));
        assert_eq!(StorageBackend::parse("redis"), None);
    }

    #[test]
    fn page_size_bounds() {
        assert!(check_page_sizes(20, 100).is_ok());
        assert!(check_page_sizes(0, 100).is_err());
        assert!(check_page_sizes(200, 100).is_err());
    }
}
