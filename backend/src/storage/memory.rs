//! In-memory dataset store for tests and local development.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::error::{StoreError, StoreResult};
use super::repository::{is_plain_name, DatasetStore};

#[derive(Debug, Clone, Default)]
pub struct MemoryDatasetStore {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryDatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a file.
    pub fn insert(&self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.write().insert(name.into(), bytes.into());
    }

    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

#[async_trait]
impl DatasetStore for MemoryDatasetStore {
    async fn exists(&self, name: &str) -> StoreResult<bool> {
        if !is_plain_name(name) {
            return Err(StoreError::invalid_name(name, "exists"));
        }
        Ok(self.files.read().contains_key(name))
    }

    async fn read(&self, name: &str) -> StoreResult<Vec<u8>> {
        if !is_plain_name(name) {
            return Err(StoreError::invalid_name(name, "read"));
        }
        self.files
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::not_found(name, "read"))
    }

    async fn write(&self, name: &str, bytes: &[u8]) -> StoreResult<()> {
        if !is_plain_name(name) {
            return Err(StoreError::invalid_name(name, "write"));
        }
        self.files.write().insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
