//! Session configuration caches
//!
//! [`NullSessionConfigurationCache`] always builds.
//! [`FileSessionConfigurationCache`] persists the configuration in the
//! tenant's app-data folder together with an identity hash of the tenant's
//! data parameters, and reuses it on later runs while the hash matches.

use crate::constants::SESSION_CONFIGURATION_FILENAME;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shellcache_domain::constants::SITES_FOLDER;
use shellcache_domain::error::Result;
use shellcache_domain::ports::{AppDataFolder, ConfigurationBuild, SessionConfigurationCache};
use shellcache_domain::value_objects::{SessionConfiguration, ShellBlueprint, ShellSettings};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration cache that never caches
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSessionConfigurationCache;

impl NullSessionConfigurationCache {
    /// Create the cache
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionConfigurationCache for NullSessionConfigurationCache {
    async fn get_configuration(&self, build: ConfigurationBuild) -> Result<SessionConfiguration> {
        build.await
    }
}

/// On-disk form of a cached configuration
#[derive(Debug, Serialize, Deserialize)]
struct CachedConfiguration {
    identity: String,
    configuration: SessionConfiguration,
}

/// Identity-checked configuration cache persisted in app data
pub struct FileSessionConfigurationCache {
    app_data_folder: Arc<dyn AppDataFolder>,
    path: String,
    identity: String,
}

impl FileSessionConfigurationCache {
    /// Cache for one tenant shell
    pub fn new(
        app_data_folder: Arc<dyn AppDataFolder>,
        shell_settings: &ShellSettings,
        shell_blueprint: &ShellBlueprint,
    ) -> Self {
        let path = app_data_folder.combine(&[
            SITES_FOLDER,
            &shell_settings.name,
            SESSION_CONFIGURATION_FILENAME,
        ]);
        Self {
            app_data_folder,
            path,
            identity: compute_identity(shell_settings, shell_blueprint),
        }
    }

    /// Identity hash the cached configuration must carry
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Virtual path of the cache file
    pub fn path(&self) -> &str {
        &self.path
    }

    async fn read_cached(&self) -> Option<SessionConfiguration> {
        let content = match self.app_data_folder.read_file(&self.path).await {
            Ok(Some(content)) => content,
            Ok(None) => return None,
            Err(e) => {
                warn!(path = %self.path, error = %e, "Could not read cached session configuration");
                return None;
            }
        };

        match serde_json::from_str::<CachedConfiguration>(&content) {
            Ok(cached) if cached.identity == self.identity => Some(cached.configuration),
            Ok(_) => {
                info!(path = %self.path, "Cached session configuration is stale");
                None
            }
            Err(e) => {
                warn!(path = %self.path, error = %e, "Cached session configuration is corrupt");
                None
            }
        }
    }

    async fn store(&self, configuration: &SessionConfiguration) {
        let cached = CachedConfiguration {
            identity: self.identity.clone(),
            configuration: configuration.clone(),
        };
        let written = match serde_json::to_string_pretty(&cached) {
            Ok(content) => self.app_data_folder.create_file(&self.path, &content).await,
            Err(e) => Err(e.into()),
        };
        match written {
            Ok(()) => debug!(path = %self.path, "Stored session configuration"),
            Err(e) => warn!(path = %self.path, error = %e, "Could not store session configuration"),
        }
    }
}

#[async_trait]
impl SessionConfigurationCache for FileSessionConfigurationCache {
    async fn get_configuration(&self, build: ConfigurationBuild) -> Result<SessionConfiguration> {
        if let Some(configuration) = self.read_cached().await {
            info!(path = %self.path, "Using cached session configuration");
            return Ok(configuration);
        }

        let configuration = build.await?;
        self.store(&configuration).await;
        Ok(configuration)
    }
}

/// Hash of everything the configuration is derived from
fn compute_identity(shell_settings: &ShellSettings, shell_blueprint: &ShellBlueprint) -> String {
    let mut hasher = Sha256::new();
    hasher.update(shell_settings.name.as_bytes());
    hasher.update([0]);
    hasher.update(shell_settings.data_provider.to_lowercase().as_bytes());
    hasher.update([0]);
    if let Some(connection_string) = &shell_settings.data_connection_string {
        hasher.update(connection_string.as_bytes());
    }
    for record in &shell_blueprint.records {
        hasher.update([0]);
        hasher.update(record.entity_name.as_bytes());
        hasher.update([1]);
        hasher.update(record.table_name.as_bytes());
        for property in &record.properties {
            hasher.update([2]);
            hasher.update(property.name.as_bytes());
            hasher.update([u8::from(property.basic_accessor)]);
        }
    }
    hex::encode(hasher.finalize())
}
