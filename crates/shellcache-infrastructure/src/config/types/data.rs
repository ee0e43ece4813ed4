//! Tenant data configuration types

use crate::constants::DEFAULT_APP_DATA_PATH;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How session configurations are memoized across restarts
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigurationCacheMode {
    /// Persist configurations in the tenant's app-data folder
    #[default]
    File,
    /// Always rebuild
    Disabled,
}

/// Tenant data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Root of the app-data folder
    pub app_data_path: PathBuf,
    /// Session configuration cache mode
    pub configuration_cache: ConfigurationCacheMode,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            app_data_path: PathBuf::from(DEFAULT_APP_DATA_PATH),
            configuration_cache: ConfigurationCacheMode::File,
        }
    }
}
