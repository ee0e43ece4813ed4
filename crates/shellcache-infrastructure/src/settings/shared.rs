//! Published settings handle

use crate::settings::source::SettingsSource;
use arc_swap::ArcSwap;
use shellcache_domain::error::Result;
use shellcache_domain::ports::Settings;
use std::any::Any;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Long-lived handle to the current values of a settings type
///
/// The provider hands out the same handle for the lifetime of the process.
/// Reloads swap the values inside it, so every holder sees them without
/// asking the provider again. Each [`load`](Self::load) returns a
/// consistent snapshot; a reload never tears a snapshot already taken.
pub struct SharedSettings<T> {
    current: ArcSwap<T>,
    version: AtomicU64,
}

impl<T: Settings> SharedSettings<T> {
    pub(crate) fn new(settings: T) -> Self {
        Self {
            current: ArcSwap::from_pointee(settings),
            version: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current values
    pub fn load(&self) -> Arc<T> {
        self.current.load_full()
    }

    /// Run `f` against the current values without cloning the snapshot
    pub fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let current = self.current.load();
        f(&current)
    }

    /// Number of reloads applied since the first load
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    pub(crate) fn replace(&self, settings: T) {
        self.current.store(Arc::new(settings));
        self.version.fetch_add(1, Ordering::AcqRel);
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedSettings<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSettings")
            .field("current", &self.current.load())
            .field("version", &self.version.load(Ordering::Acquire))
            .finish()
    }
}

/// Type-erased view of a [`SharedSettings`] stored in the provider cache
pub(crate) trait SettingsEntry: Send + Sync {
    /// Recover the concrete handle
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// Parse `contents`, run the post-load hook and swap the values in
    fn refresh(&self, path: &Path, contents: &str) -> Result<()>;
}

impl<T: Settings> SettingsEntry for SharedSettings<T> {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn refresh(&self, path: &Path, contents: &str) -> Result<()> {
        let mut fresh: T = SettingsSource::parse(path, contents)?;
        fresh.after_load();
        self.replace(fresh);
        Ok(())
    }
}
