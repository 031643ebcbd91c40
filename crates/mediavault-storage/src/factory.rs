//! Blob store factory

use crate::{BlobStore, LocalBlobStore, MemoryBlobStore, StorageError, StorageResult};
use std::sync::Arc;

/// Create a blob store backend for the given provider name.
///
/// `"filesystem"` requires `base_path`; `"memory"` holds blobs in process
/// memory and is intended for tests and demos.
pub async fn create_blob_store(
    provider: &str,
    base_path: Option<&str>,
) -> StorageResult<Arc<dyn BlobStore>> {
    match provider {
        "filesystem" => {
            let base_path = base_path.ok_or_else(|| {
                StorageError::ConfigError(
                    "filesystem provider requires a storage path".to_string(),
                )
            })?;
            let store = LocalBlobStore::new(provider, base_path).await?;
            Ok(Arc::new(store))
        }
        "memory" => Ok(Arc::new(MemoryBlobStore::new(provider))),
        other => Err(StorageError::ConfigError(format!(
            "Unknown blob store provider: {}",
            other
        ))),
    }
}
