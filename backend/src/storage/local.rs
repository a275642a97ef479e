//! Filesystem-backed dataset store rooted at the data directory.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::error::{StoreError, StoreResult};
use super::repository::{is_plain_name, DatasetStore};

#[derive(Debug, Clone)]
pub struct FsDatasetStore {
    root: PathBuf,
}

impl FsDatasetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if needed.
    pub async fn ensure_root(&self) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::io(&e, &self.root.display().to_string(), "create_dir"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str, operation: &str) -> StoreResult<PathBuf> {
        if !is_plain_name(name) {
            return Err(StoreError::invalid_name(name, operation));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl DatasetStore for FsDatasetStore {
    async fn exists(&self, name: &str) -> StoreResult<bool> {
        let path = self.path_for(name, "exists")?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(&e, name, "exists")),
        }
    }

    async fn read(&self, name: &str) -> StoreResult<Vec<u8>> {
        let path = self.path_for(name, "read")?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| StoreError::from_io(e, name, "read"))
    }

    async fn write(&self, name: &str, bytes: &[u8]) -> StoreResult<()> {
        let path = self.path_for(name, "write")?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StoreError::io(&e, name, "write"))
    }

    fn describe(&self) -> String {
        format!("filesystem:{}", self.root.display())
    }
}
