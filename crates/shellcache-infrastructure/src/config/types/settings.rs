//! Typed settings configuration types

use crate::constants::{DEFAULT_SETTINGS_PATH, SETTINGS_RELOAD_DELAY_MS};
use serde::{Deserialize, Serialize};
use shellcache_domain::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Typed settings source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// Directory holding one `<Key>.json` file per settings type
    ///
    /// A leading `~` stands for [`base_directory`](Self::base_directory).
    pub path: PathBuf,

    /// Directory substituted for a leading `~` in `path`
    pub base_directory: Option<PathBuf>,

    /// Reload settings when their files change
    pub watch: bool,

    /// Wait after a change notification before reading (milliseconds)
    pub reload_delay_ms: u64,
}

impl SettingsConfig {
    /// Settings configuration rooted at `path`
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Physical settings directory
    pub fn resolve_root(&self) -> Result<PathBuf> {
        let raw = self.path.to_string_lossy();
        if !raw.starts_with('~') {
            return Ok(self.path.clone());
        }

        let base = self.base_directory.as_ref().ok_or_else(|| {
            Error::configuration(format!(
                "Settings path '{}' starts with '~' but no base_directory is configured",
                raw
            ))
        })?;
        let base = base.to_string_lossy().into_owned();
        let normalized = match raw.strip_prefix("~\\") {
            Some(rest) => format!("~/{}", rest),
            None => raw.into_owned(),
        };
        let expanded = shellexpand::tilde_with_context(&normalized, || Some(base));
        Ok(PathBuf::from(expanded.as_ref()))
    }

    /// Settle delay before reloading
    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            base_directory: None,
            watch: true,
            reload_delay_ms: SETTINGS_RELOAD_DELAY_MS,
        }
    }
}
