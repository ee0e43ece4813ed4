// Clippy allows for complex patterns in infrastructure code
#![allow(clippy::collapsible_if)]

//! # Infrastructure Layer
//!
//! Lazy, guarded construction of per-key resources and everything needed to
//! keep them fresh.
//!
//! ## Module Categories
//!
//! ### Caching
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Per-key single-flight resource cache |
//! | [`data`] | Tenant session factory holder and its collaborators |
//! | [`settings`] | JSON settings provider with file watching |
//!
//! ### Configuration & Wiring
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration loading |
//! | [`di`] | Composition root |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod cache;
pub mod config;
pub mod constants;
pub mod data;
pub mod di;
pub mod error_ext;
pub mod logging;
pub mod settings;
pub mod utils;

// Re-export commonly used types
pub use cache::ResourceCache;
pub use data::SessionFactoryHolder;
pub use error_ext::ErrorContext;
pub use settings::{JsonFileSettingsProvider, SharedSettings};
pub use utils::TimedOperation;
