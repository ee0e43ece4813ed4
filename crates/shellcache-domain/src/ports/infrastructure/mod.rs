//! Infrastructure Ports

/// App-data folder access
pub mod app_data;
/// Change notification sources
pub mod watch;

pub use app_data::AppDataFolder;
pub use watch::{ChangeListener, ChangeNotifier};
