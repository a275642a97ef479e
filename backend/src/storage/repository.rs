//! Dataset store trait.
//!
//! The data directory is a flat namespace of files keyed by plain file
//! name. Config files, bundled datasets and uploads all live there.

use async_trait::async_trait;

use super::error::StoreResult;

/// Storage backend for datasets and dashboard configs.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across handlers.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Whether a regular file with this name exists.
    async fn exists(&self, name: &str) -> StoreResult<bool>;

    /// Read the full contents of a file.
    async fn read(&self, name: &str) -> StoreResult<Vec<u8>>;

    /// Create or replace a file.
    async fn write(&self, name: &str, bytes: &[u8]) -> StoreResult<()>;

    /// Short description of the backend for logs and health checks.
    fn describe(&self) -> String;
}

/// Whether `name` is a single path component that cannot escape the store.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
