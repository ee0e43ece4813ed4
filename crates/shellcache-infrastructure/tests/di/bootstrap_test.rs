//! Application context wiring tests

use crate::test_utils::{content_blueprint, write_settings, SmtpSettings};
use shellcache_domain::ports::SessionFactoryHolderInterface;
use shellcache_domain::value_objects::ShellSettings;
use shellcache_infrastructure::config::{
    AppConfig, CacheConfig, ConfigBuilder, ConfigurationCacheMode, DataConfig, SettingsConfig,
};
use shellcache_infrastructure::di::init_app;
use std::time::Duration;
use tempfile::TempDir;

fn test_config(root: &TempDir, configuration_cache: ConfigurationCacheMode) -> AppConfig {
    ConfigBuilder::new()
        .with_settings(SettingsConfig {
            watch: false,
            ..SettingsConfig::with_path(root.path().join("settings"))
        })
        .with_data(DataConfig {
            app_data_path: root.path().join("App_Data"),
            configuration_cache,
        })
        .build()
}

#[tokio::test]
async fn test_init_app_wires_settings_provider() {
    let root = TempDir::new().unwrap();
    std::fs::create_dir_all(root.path().join("settings")).unwrap();
    write_settings(
        &root.path().join("settings"),
        "SmtpSettings",
        r#"{ "host": "smtp.local", "port": 25 }"#,
    );

    let context = init_app(test_config(&root, ConfigurationCacheMode::Disabled))
        .await
        .unwrap();
    let smtp = context.settings().get_settings::<SmtpSettings>().await.unwrap();

    assert_eq!(smtp.load().host, "smtp.local");
    // Watching disabled: registrations are accepted but never fire
    assert!(context.notifier().is_watching("SmtpSettings"));
}

#[tokio::test]
async fn test_shell_holder_is_shared_per_tenant() {
    let root = TempDir::new().unwrap();
    let context = init_app(test_config(&root, ConfigurationCacheMode::Disabled))
        .await
        .unwrap();

    let first = context
        .shell(ShellSettings::new("tenant-a", "memory"), content_blueprint())
        .await
        .unwrap();
    let second = context
        .shell(ShellSettings::new("tenant-a", "memory"), content_blueprint())
        .await
        .unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    let factory = first.get_session_factory().await.unwrap();
    assert_eq!(factory.provider_name(), "memory");
    assert!(root.path().join("App_Data/Sites/tenant-a").is_dir());
    assert!(!root.path().join("App_Data/Sites/tenant-a/mappings.json").exists());

    assert!(context.release_shell("tenant-a"));
    assert!(factory.is_closed());
    assert!(!context.release_shell("tenant-a"));
}

#[tokio::test]
async fn test_file_configuration_cache_mode_persists_mappings() {
    let root = TempDir::new().unwrap();
    let context = init_app(test_config(&root, ConfigurationCacheMode::File))
        .await
        .unwrap();

    let holder = context
        .shell(ShellSettings::new("tenant-b", "memory"), content_blueprint())
        .await
        .unwrap();
    holder.get_configuration().await.unwrap();

    assert!(root.path().join("App_Data/Sites/tenant-b/mappings.json").is_file());
}

#[tokio::test]
async fn test_shutdown_disposes_every_shell() {
    let root = TempDir::new().unwrap();
    let mut config = test_config(&root, ConfigurationCacheMode::Disabled);
    config.cache = CacheConfig {
        build_timeout_secs: 5,
    };
    let context = init_app(config).await.unwrap();

    let mut factories = Vec::new();
    for tenant in ["a", "b", "c"] {
        let holder = context
            .shell(ShellSettings::new(tenant, "memory"), content_blueprint())
            .await
            .unwrap();
        factories.push(holder.get_session_factory().await.unwrap());
    }

    context.shutdown();

    assert!(factories.iter().all(|factory| factory.is_closed()));
    assert_eq!(context.config.cache.build_timeout(), Some(Duration::from_secs(5)));
}

#[test]
fn test_init_app_outside_runtime_fails() {
    let root = TempDir::new().unwrap();
    let result = futures::executor::block_on(init_app(test_config(
        &root,
        ConfigurationCacheMode::Disabled,
    )));
    assert!(result.is_err());
}
