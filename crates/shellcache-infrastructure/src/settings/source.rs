//! File-backed settings source
//!
//! Reads `<root>/<KEY>.json` and sorts failures into genuine load errors
//! and transient races with a concurrent writer.

use serde::de::DeserializeOwned;
use shellcache_domain::constants::SETTINGS_FILE_EXTENSION;
use shellcache_domain::error::{Error, Result};
use shellcache_domain::ports::Settings;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Messages reported while another process holds the file
const SHARING_VIOLATION_MESSAGES: [&str; 2] = [
    "The process cannot access the file",
    "being used by another process",
];

/// Directory of settings files
#[derive(Debug, Clone)]
pub struct SettingsSource {
    root: PathBuf,
}

impl SettingsSource {
    /// Source rooted at an already resolved directory
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Settings directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File name for a settings key
    pub fn file_name(key: &str) -> String {
        format!("{}.{}", key, SETTINGS_FILE_EXTENSION)
    }

    /// Full path for a settings key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(Self::file_name(key))
    }

    /// Read a settings file, `None` when it does not exist
    pub async fn read(&self, path: &Path) -> Result<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if is_transient_io_error(&e) => Err(Error::transient_race(path, e.to_string())),
            Err(e) => Err(Error::settings_load_with_source(path, e)),
        }
    }

    /// Deserialize settings read from `path`
    pub fn parse<T: DeserializeOwned>(path: &Path, contents: &str) -> Result<T> {
        if contents.trim().is_empty() {
            return Err(Error::transient_race(path, "file is empty"));
        }
        serde_json::from_str(contents).map_err(|e| {
            if e.is_eof() {
                Error::transient_race(path, format!("file is truncated: {}", e))
            } else {
                Error::settings_load_with_source(path, e)
            }
        })
    }

    /// Load settings of type `T` and run their post-load hook
    ///
    /// `None` when the file does not exist.
    pub async fn load<T: Settings>(&self) -> Result<Option<T>> {
        let path = self.path_for(T::KEY);
        let Some(contents) = self.read(&path).await? else {
            return Ok(None);
        };
        let mut settings: T = Self::parse(&path, &contents)?;
        settings.after_load();
        Ok(Some(settings))
    }
}

/// Whether an I/O error comes from racing another writer
pub fn is_transient_io_error(error: &io::Error) -> bool {
    if matches!(error.kind(), ErrorKind::Interrupted | ErrorKind::WouldBlock) {
        return true;
    }
    // ERROR_SHARING_VIOLATION and ERROR_LOCK_VIOLATION
    if cfg!(windows) && matches!(error.raw_os_error(), Some(32 | 33)) {
        return true;
    }
    let message = error.to_string();
    SHARING_VIOLATION_MESSAGES
        .iter()
        .any(|pattern| message.contains(pattern))
}
