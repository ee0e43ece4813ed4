//! Configuration types module

pub mod app;
pub mod cache;
pub mod data;
pub mod logging;
pub mod settings;

// Re-export main types
pub use app::AppConfig;
pub use cache::CacheConfig;
pub use data::{ConfigurationCacheMode, DataConfig};
pub use logging::LoggingConfig;
pub use settings::SettingsConfig;
