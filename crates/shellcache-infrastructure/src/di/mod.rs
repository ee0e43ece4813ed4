//! Composition root
//!
//! Wires configuration into concrete collaborators:
//!
//! ```text
//! AppConfig ──► init_app ──► AppContext
//!                              ├── PhysicalAppDataFolder
//!                              ├── DataServicesProviderRegistry
//!                              ├── ChangeNotifier (file or null)
//!                              ├── JsonFileSettingsProvider
//!                              └── shells: tenant ──► SessionFactoryHolder
//! ```

pub mod bootstrap;

pub use bootstrap::{init_app, AppContext};
