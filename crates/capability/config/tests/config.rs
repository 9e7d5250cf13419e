use fam_config::{AppConfig, ConfigError, StorageBackend};

#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("FAM_STORAGE", "memory");
        std::env::set_var("FAM_HTTP_ADDR", "127.0.0.1:8081");
        std::env::set_var("FAM_DEFAULT_PAGE_SIZE", "25");
        std::env::set_var("FAM_MAX_PAGE_SIZE", "200");
        std::env::set_var("FAM_RUN_MIGRATIONS", "true");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.storage, StorageBackend::Memory);
    assert_eq!(config.http_addr, "127.0.0.1:8081");
    assert_eq!(config.default_page_size, 25);
    assert_eq!(config.max_page_size, 200);
    assert_eq!(config.db_max_connections, 8);
    assert!(config.run_migrations);
    assert!(config.database_url.is_none());

    unsafe {
        std::env::set_var("FAM_DEFAULT_PAGE_SIZE", "500");
    }
    assert!(matches!(
        AppConfig::from_env(),
        Err(ConfigError::Invalid(key, _)) if key == "FAM_DEFAULT_PAGE_SIZE"
    ));

    unsafe {
        std::env::set_var("FAM_DEFAULT_PAGE_SIZE", "twenty");
    }
    assert!(AppConfig::from_env().is_err());

    unsafe {
        std::env::remove_var("FAM_DEFAULT_PAGE_SIZE");
        std::env::set_var("FAM_STORAGE", "postgres");
        std::env::remove_var("FAM_DATABASE_URL");
    }
    assert!(matches!(
        AppConfig::from_env(),
        Err(ConfigError::Missing(key)) if key == "FAM_DATABASE_URL"
    ));
}
