//! Change notification port
//!
//! Abstracts the OS-specific notification mechanism behind a callback.

use crate::error::Result;
use crate::value_objects::ChangeNotification;
use std::path::Path;
use std::sync::Arc;

/// Callback receiving change notifications
///
/// Invoked from whatever thread the notification source uses. Must not block.
pub type ChangeListener = Arc<dyn Fn(ChangeNotification) + Send + Sync>;

/// Source of "file changed" signals for settings files
pub trait ChangeNotifier: Send + Sync {
    /// Watch `directory/file_name` on behalf of `settings_key`
    ///
    /// One registration per settings key; registering an already watched
    /// key is a no-op. Registrations stay active for the notifier's lifetime.
    fn watch(
        &self,
        directory: &Path,
        file_name: &str,
        settings_key: &str,
        listener: ChangeListener,
    ) -> Result<()>;

    /// Whether `settings_key` is being watched
    fn is_watching(&self, settings_key: &str) -> bool;
}
