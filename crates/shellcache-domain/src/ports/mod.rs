//! Domain Port Interfaces
//!
//! Boundary contracts between the cache core and its collaborators.
//!
//! - **data** - session factory holder, data providers, configuration cache
//! - **infrastructure/** - app-data folder and change notification sources
//! - **settings** - contract of a typed settings record

/// Data access ports
pub mod data;
/// Infrastructure service ports
pub mod infrastructure;
/// Typed settings contract
pub mod settings;

pub use data::{
    ConfigurationBuild, DataServicesProvider, DataServicesProviderFactory, SessionConfigurationCache,
    SessionFactory, SessionFactoryHolderInterface,
};
pub use infrastructure::{AppDataFolder, ChangeListener, ChangeNotifier};
pub use settings::Settings;
