//! Change notification value object

use std::path::PathBuf;

/// Signal that the backing source of a settings type changed
///
/// Delivery is at-least-once: the same change may be reported several
/// times, or after the write it describes has already been superseded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeNotification {
    /// File that changed
    pub path: PathBuf,
    /// Settings type owning the file
    pub settings_key: String,
}

impl ChangeNotification {
    /// Create a notification for a settings type
    pub fn new<P: Into<PathBuf>, S: Into<String>>(path: P, settings_key: S) -> Self {
        Self {
            path: path.into(),
            settings_key: settings_key.into(),
        }
    }
}
