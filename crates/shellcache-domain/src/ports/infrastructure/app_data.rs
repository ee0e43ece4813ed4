//! App-data folder port

use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Virtual folder holding per-tenant data
///
/// Paths are virtual, `/`-separated and relative to the folder root.
/// Operations touching storage are async.
#[async_trait]
pub trait AppDataFolder: Send + Sync {
    /// Join virtual path segments
    fn combine(&self, paths: &[&str]) -> String;

    /// Create a folder and its parents if missing
    async fn create_directory(&self, path: &str) -> Result<()>;

    /// Physical location of a virtual path
    fn map_path(&self, path: &str) -> PathBuf;

    /// Whether a file exists
    async fn file_exists(&self, path: &str) -> bool;

    /// Read a file, `None` when absent
    async fn read_file(&self, path: &str) -> Result<Option<String>>;

    /// Create or overwrite a file, creating parent folders
    async fn create_file(&self, path: &str, content: &str) -> Result<()>;
}
