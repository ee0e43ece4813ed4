//! Settings file change notifiers
//!
//! [`FileChangeNotifier`] watches the settings directory with `notify`.
//! [`NullChangeNotifier`] accepts registrations and never fires, for
//! deployments that disable reloading.

use crate::error_ext::ErrorContext;
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use shellcache_domain::error::Result;
use shellcache_domain::ports::{ChangeListener, ChangeNotifier};
use shellcache_domain::value_objects::ChangeNotification;
use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// OS file system notifier, one watcher per settings key
#[derive(Default)]
pub struct FileChangeNotifier {
    watchers: DashMap<String, RecommendedWatcher>,
}

impl FileChangeNotifier {
    /// Create a notifier with no registrations
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of active registrations
    pub fn watch_count(&self) -> usize {
        self.watchers.len()
    }

    fn create_watcher(
        directory: &Path,
        file_name: &str,
        settings_key: &str,
        listener: ChangeListener,
    ) -> Result<RecommendedWatcher> {
        let target = OsString::from(file_name);
        let key = settings_key.to_string();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !is_content_change(&event) {
                        return;
                    }
                    for path in &event.paths {
                        if path.file_name() == Some(target.as_os_str()) {
                            listener(ChangeNotification::new(path.clone(), key.clone()));
                        }
                    }
                }
                Err(e) => warn!(settings = %key, error = %e, "Settings file watch error"),
            },
            Config::default(),
        )
        .context("Failed to create settings file watcher")?;

        watcher
            .watch(directory, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch settings directory {}", directory.display()))?;
        Ok(watcher)
    }
}

impl ChangeNotifier for FileChangeNotifier {
    fn watch(
        &self,
        directory: &Path,
        file_name: &str,
        settings_key: &str,
        listener: ChangeListener,
    ) -> Result<()> {
        match self.watchers.entry(settings_key.to_string()) {
            Entry::Occupied(_) => {
                debug!(settings = %settings_key, "Settings file already watched");
                Ok(())
            }
            Entry::Vacant(slot) => {
                std::fs::create_dir_all(directory).io_context(format!(
                    "Failed to create settings directory {}",
                    directory.display()
                ))?;
                let watcher = Self::create_watcher(directory, file_name, settings_key, listener)?;
                slot.insert(watcher);
                info!(
                    settings = %settings_key,
                    file = %directory.join(file_name).display(),
                    "Watching settings file"
                );
                Ok(())
            }
        }
    }

    fn is_watching(&self, settings_key: &str) -> bool {
        self.watchers.contains_key(settings_key)
    }
}

impl fmt::Debug for FileChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileChangeNotifier")
            .field("watchers", &self.watchers.len())
            .finish()
    }
}

/// Writes and creations; access and metadata-only events are ignored
fn is_content_change(event: &Event) -> bool {
    match event.kind {
        EventKind::Create(_) => true,
        EventKind::Modify(notify::event::ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

/// Notifier that records registrations and never fires
#[derive(Debug, Default)]
pub struct NullChangeNotifier {
    keys: DashSet<String>,
}

impl NullChangeNotifier {
    /// Create the notifier
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChangeNotifier for NullChangeNotifier {
    fn watch(
        &self,
        _directory: &Path,
        _file_name: &str,
        settings_key: &str,
        _listener: ChangeListener,
    ) -> Result<()> {
        self.keys.insert(settings_key.to_string());
        Ok(())
    }

    fn is_watching(&self, settings_key: &str) -> bool {
        self.keys.contains(settings_key)
    }
}
