//! JSON file settings provider
//!
//! Settings are loaded lazily, once per key, and published as a
//! [`SharedSettings`] handle. The first load also registers a watch on the
//! backing file. Change notifications go through a channel to a single
//! dispatcher task:
//!
//! ```text
//! notifier thread ──send──► channel ──► dispatcher
//!                                          │ settle delay
//!                                          │ drain + coalesce per key
//!                                          ▼
//!                                   handle_change ──► reload_settings
//! ```
//!
//! Reload failures are logged and the previous values stay published.

use crate::cache::ResourceCache;
use crate::config::SettingsConfig;
use crate::constants::JSON_SETTINGS_PROVIDER_TYPE;
use crate::settings::shared::{SettingsEntry, SharedSettings};
use crate::settings::source::SettingsSource;
use futures::FutureExt;
use shellcache_domain::error::{Error, Result};
use shellcache_domain::ports::{ChangeListener, ChangeNotifier, Settings};
use shellcache_domain::value_objects::ChangeNotification;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn};

/// Result of a reload request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The settings type was never loaded, nothing to refresh
    NotLoaded,
    /// New values were published
    Reloaded,
    /// The backing file is gone, previous values kept
    SourceMissing,
}

/// Settings provider reading `<root>/<KEY>.json`
pub struct JsonFileSettingsProvider {
    source: SettingsSource,
    cache: ResourceCache<&'static str, Arc<dyn SettingsEntry>>,
    notifier: Arc<dyn ChangeNotifier>,
    notifications: mpsc::UnboundedSender<ChangeNotification>,
    reload_lock: Mutex<()>,
}

impl JsonFileSettingsProvider {
    /// Create the provider and start its change dispatcher
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &SettingsConfig, notifier: Arc<dyn ChangeNotifier>) -> Result<Arc<Self>> {
        let root = config.resolve_root()?;
        let runtime = Handle::try_current().map_err(|e| {
            Error::infrastructure_with_source(
                "The settings provider must be created inside a Tokio runtime",
                e,
            )
        })?;

        let (sender, receiver) = mpsc::unbounded_channel();
        let provider = Arc::new(Self {
            source: SettingsSource::new(&root),
            cache: ResourceCache::new("settings"),
            notifier,
            notifications: sender,
            reload_lock: Mutex::new(()),
        });

        runtime.spawn(dispatch_changes(
            Arc::downgrade(&provider),
            receiver,
            config.reload_delay(),
        ));
        info!(root = %root.display(), "JSON settings provider ready");
        Ok(provider)
    }

    /// Provider type name
    pub fn provider_type(&self) -> &'static str {
        JSON_SETTINGS_PROVIDER_TYPE
    }

    /// Settings directory
    pub fn root(&self) -> &Path {
        self.source.root()
    }

    /// Handle to the settings of type `T`
    ///
    /// The first call reads `<root>/<T::KEY>.json`. A missing or unreadable
    /// file yields default values, which are still published and watched.
    /// Every later call returns the same handle; reloads update it in place.
    pub async fn get_settings<T: Settings>(&self) -> Result<Arc<SharedSettings<T>>> {
        let entry = self
            .cache
            .get_or_build(T::KEY, || self.load_entry::<T>())
            .await?;

        entry.into_any().downcast::<SharedSettings<T>>().map_err(|_| {
            Error::internal(format!(
                "Settings key '{}' is already used by another settings type",
                T::KEY
            ))
        })
    }

    /// Hand `settings` back unchanged
    ///
    /// Nothing is persisted; durability needs a collaborator of its own.
    pub fn save_settings<T: Settings>(&self, settings: T) -> T {
        debug!(settings = T::KEY, "Settings save is a pass-through, nothing persisted");
        settings
    }

    /// Whether the backing file of `key` is watched
    pub fn is_watching(&self, key: &str) -> bool {
        self.notifier.is_watching(key)
    }

    /// Whether settings for `key` have been loaded
    pub fn is_loaded(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    /// Re-read the file behind `key` and publish its values
    ///
    /// Reloads are serialized. A parse failure or a transient read race
    /// returns an error and leaves the published values as they were.
    pub async fn reload_settings(&self, key: &str) -> Result<ReloadOutcome> {
        let Some(entry) = self.cache.get(key) else {
            debug!(settings = %key, "Settings not loaded, nothing to reload");
            return Ok(ReloadOutcome::NotLoaded);
        };

        let _guard = self.reload_lock.lock().await;
        let path = self.source.path_for(key);
        let Some(contents) = self.source.read(&path).await? else {
            warn!(settings = %key, path = %path.display(), "Settings file is gone, keeping previous values");
            return Ok(ReloadOutcome::SourceMissing);
        };

        entry.refresh(&path, &contents)?;
        info!(settings = %key, path = %path.display(), "Settings reloaded");
        Ok(ReloadOutcome::Reloaded)
    }

    /// React to a change of a settings file
    ///
    /// Never fails: errors are logged and the previous values stay in place.
    pub async fn handle_change(&self, notification: &ChangeNotification) {
        match self.reload_settings(&notification.settings_key).await {
            Ok(outcome) => debug!(
                settings = %notification.settings_key,
                outcome = ?outcome,
                "Handled settings change"
            ),
            Err(e) if e.is_transient() => debug!(
                settings = %notification.settings_key,
                error = %e,
                "Settings file still being written, waiting for the next notification"
            ),
            Err(e) => error!(
                settings = %notification.settings_key,
                error = %e,
                "Error reloading settings, keeping previous values"
            ),
        }
    }

    async fn load_entry<T: Settings>(&self) -> Result<Arc<dyn SettingsEntry>> {
        let settings = match self.source.load::<T>().await {
            Ok(Some(settings)) => {
                debug!(settings = T::KEY, "Loaded settings from file");
                settings
            }
            Ok(None) => {
                debug!(settings = T::KEY, "No settings file, using defaults");
                T::default()
            }
            Err(e) => {
                warn!(settings = T::KEY, error = %e, "Could not load settings, using defaults");
                T::default()
            }
        };

        self.register_watch(T::KEY);
        let entry: Arc<dyn SettingsEntry> = Arc::new(SharedSettings::new(settings));
        Ok(entry)
    }

    fn register_watch(&self, key: &'static str) {
        let sender = self.notifications.clone();
        let listener: ChangeListener = Arc::new(move |notification| {
            // Closed only once the provider is gone
            let _ = sender.send(notification);
        });

        let file_name = SettingsSource::file_name(key);
        if let Err(e) = self
            .notifier
            .watch(self.source.root(), &file_name, key, listener)
        {
            warn!(settings = key, error = %e, "Could not watch settings file, changes will not be picked up");
        }
    }
}

impl fmt::Debug for JsonFileSettingsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonFileSettingsProvider")
            .field("root", &self.source.root())
            .field("cache", &self.cache)
            .finish()
    }
}

async fn dispatch_changes(
    provider: Weak<JsonFileSettingsProvider>,
    mut receiver: mpsc::UnboundedReceiver<ChangeNotification>,
    settle_delay: Duration,
) {
    while let Some(first) = receiver.recv().await {
        if !settle_delay.is_zero() {
            tokio::time::sleep(settle_delay).await;
        }

        let mut pending = vec![first];
        while let Ok(next) = receiver.try_recv() {
            if !pending
                .iter()
                .any(|queued| queued.settings_key == next.settings_key)
            {
                pending.push(next);
            }
        }

        let Some(provider) = provider.upgrade() else {
            break;
        };
        for notification in &pending {
            let handled = AssertUnwindSafe(provider.handle_change(notification))
                .catch_unwind()
                .await;
            if handled.is_err() {
                error!(
                    settings = %notification.settings_key,
                    "Settings reload panicked, still watching for changes"
                );
            }
        }
    }
    debug!("Settings change dispatcher stopped");
}
