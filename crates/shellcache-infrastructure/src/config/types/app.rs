//! Main application configuration

use super::{CacheConfig, DataConfig, LoggingConfig, SettingsConfig};
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Typed settings source
    pub settings: SettingsConfig,
    /// Tenant data configuration
    pub data: DataConfig,
    /// Resource cache configuration
    pub cache: CacheConfig,
}
