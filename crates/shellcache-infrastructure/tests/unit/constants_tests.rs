//! Constants Tests

use shellcache_infrastructure::constants::*;

#[test]
fn test_env_prefix_and_separator() {
    assert_eq!(CONFIG_ENV_PREFIX, "SHELLCACHE");
    assert_eq!(CONFIG_ENV_SEPARATOR, "__");
    assert!(LOG_ENV_VAR.starts_with(CONFIG_ENV_PREFIX));
}

#[test]
fn test_settings_defaults() {
    assert_eq!(JSON_SETTINGS_PROVIDER_TYPE, "JSON File");
    assert_eq!(SETTINGS_RELOAD_DELAY_MS, 100);
    assert!(!DEFAULT_SETTINGS_PATH.is_empty());
}

#[test]
fn test_build_timeout_disabled_by_default() {
    assert_eq!(DEFAULT_BUILD_TIMEOUT_SECS, 0);
}
