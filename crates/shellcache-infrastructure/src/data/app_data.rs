//! Physical app-data folder
//!
//! Storage access goes through `tokio::fs`.

use crate::error_ext::ErrorContext;
use async_trait::async_trait;
use shellcache_domain::error::{Error, Result};
use shellcache_domain::ports::AppDataFolder;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// App-data folder backed by a directory on disk
#[derive(Debug, Clone)]
pub struct PhysicalAppDataFolder {
    root: PathBuf,
}

impl PhysicalAppDataFolder {
    /// Folder rooted at `root`
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Physical root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a virtual path, rejecting anything that leaves the root
    fn checked_path(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative.components().any(|component| {
            matches!(
                component,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(Error::invalid_argument(format!(
                "App data path '{}' escapes the app data folder",
                path
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AppDataFolder for PhysicalAppDataFolder {
    fn combine(&self, paths: &[&str]) -> String {
        paths
            .iter()
            .map(|segment| segment.trim_matches(|c| c == '/' || c == '\\'))
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }

    async fn create_directory(&self, path: &str) -> Result<()> {
        let target = self.checked_path(path)?;
        tokio::fs::create_dir_all(&target)
            .await
            .io_context(format!("Failed to create directory {}", target.display()))
    }

    fn map_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    async fn file_exists(&self, path: &str) -> bool {
        let Ok(target) = self.checked_path(path) else {
            return false;
        };
        tokio::fs::metadata(&target)
            .await
            .is_ok_and(|metadata| metadata.is_file())
    }

    async fn read_file(&self, path: &str) -> Result<Option<String>> {
        let target = self.checked_path(path)?;
        match tokio::fs::read_to_string(&target).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io_with_source(
                format!("Failed to read {}", target.display()),
                e,
            )),
        }
    }

    async fn create_file(&self, path: &str, content: &str) -> Result<()> {
        let target = self.checked_path(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .io_context(format!("Failed to create directory {}", parent.display()))?;
        }
        tokio::fs::write(&target, content)
            .await
            .io_context(format!("Failed to write {}", target.display()))
    }
}
