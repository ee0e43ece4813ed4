//! Typed settings
//!
//! One JSON file per settings type, cached on first use and refreshed in
//! place when the file changes.
//!
//! ```text
//! get_settings::<T>() ──► ResourceCache[T::KEY] ──► SharedSettings<T> (handle)
//!                                                         ▲
//! FileChangeNotifier ──► channel ──► dispatcher ──► reload_settings(T::KEY)
//! ```

pub mod provider;
pub mod shared;
pub mod source;
pub mod watcher;

pub use provider::{JsonFileSettingsProvider, ReloadOutcome};
pub use shared::SharedSettings;
pub use source::SettingsSource;
pub use watcher::{FileChangeNotifier, NullChangeNotifier};
