//! Configuration management
//!
//! TOML files, environment variables and defaults merged with Figment.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{
    AppConfig, CacheConfig, ConfigurationCacheMode, DataConfig, LoggingConfig, SettingsConfig,
};
