//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Naming conventions shared with collaborators live in `shellcache_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "shellcache.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "shellcache";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "SHELLCACHE";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "SHELLCACHE_LOG";

/// Fallback log file stem
pub const DEFAULT_LOG_FILE_STEM: &str = "shellcache";

// ============================================================================
// SETTINGS CONSTANTS
// ============================================================================

/// Provider type reported by the JSON settings provider
pub const JSON_SETTINGS_PROVIDER_TYPE: &str = "JSON File";

/// Default settings directory
pub const DEFAULT_SETTINGS_PATH: &str = "settings";

/// Wait after a change notification before reading the file (milliseconds)
pub const SETTINGS_RELOAD_DELAY_MS: u64 = 100;

// ============================================================================
// DATA CONSTANTS
// ============================================================================

/// Default app-data folder
pub const DEFAULT_APP_DATA_PATH: &str = "App_Data";

/// File holding a tenant's persisted session configuration
pub const SESSION_CONFIGURATION_FILENAME: &str = "mappings.json";

/// Name of the built-in in-memory data provider
pub const MEMORY_PROVIDER_NAME: &str = "memory";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default build timeout in seconds (0 disables the timeout)
pub const DEFAULT_BUILD_TIMEOUT_SECS: u64 = 0;
