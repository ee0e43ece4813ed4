//! Tenant data access
//!
//! The [`SessionFactoryHolder`] builds one session configuration and one
//! session factory per tenant shell. Its collaborators live next to it:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`holder`] | Per-tenant session factory holder |
//! | [`app_data`] | Physical app-data folder |
//! | [`configuration_cache`] | Null and file-backed session configuration caches |
//! | [`registry`] | Data provider lookup by name |
//! | [`memory`] | Built-in in-memory data provider |

pub mod app_data;
pub mod configuration_cache;
pub mod holder;
pub mod memory;
pub mod registry;

pub use app_data::PhysicalAppDataFolder;
pub use configuration_cache::{FileSessionConfigurationCache, NullSessionConfigurationCache};
pub use holder::SessionFactoryHolder;
pub use memory::{MemoryDataServicesProvider, MemorySessionFactory};
pub use registry::DataServicesProviderRegistry;
