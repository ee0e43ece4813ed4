//! # shellcache
//!
//! Lazily built, per-key cached resources for multi-tenant hosts, and typed
//! settings that reload in place when their JSON files change.
//!
//! ## Features
//!
//! - **Single-flight builds**: one construction per key, failures are retried
//! - **Tenant session factories**: configuration and factory built once per shell
//! - **Typed settings**: one JSON file per settings type, watched and hot-reloaded
//!
//! ## Example
//!
//! ```ignore
//! use shellcache::infrastructure::config::ConfigLoader;
//! use shellcache::infrastructure::di::init_app;
//!
//! let context = init_app(ConfigLoader::new().load()?).await?;
//! let smtp = context.settings().get_settings::<SmtpSettings>().await?;
//! println!("{}", smtp.load().host);
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Ports, value objects and errors
//! - `infrastructure` - Caches, settings provider, data access, config, logging

/// Domain layer - ports, value objects and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use shellcache_domain::*;
}

/// Infrastructure layer - caches, settings, data access and wiring
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use shellcache_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the main entry points at the crate root
pub use infrastructure::di::{init_app, AppContext};
pub use infrastructure::{JsonFileSettingsProvider, ResourceCache, SharedSettings};
