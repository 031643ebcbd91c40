//! Local filesystem blob store

use crate::traits::{BlobStore, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem blob store.
///
/// Keys map directly to paths under `base_path`; keys containing traversal
/// sequences or a leading `/` are rejected before touching the filesystem.
#[derive(Clone)]
pub struct LocalBlobStore {
    provider: String,
    base_path: PathBuf,
}

impl LocalBlobStore {
    /// Create a new store rooted at `base_path`, creating the directory if
    /// needed.
    pub async fn new(provider: impl Into<String>, base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalBlobStore {
            provider: provider.into(),
            base_path,
        })
    }

    /// Convert a storage key to a filesystem path, rejecting keys that
    /// could escape the base directory.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(format!(
                "Storage key contains invalid characters: {}",
                key
            )));
        }

        Ok(self.base_path.join(key))
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider(&self) -> &str {
        &self.provider
    }

    async fn put(&self, key: &str, _content_type: &str, data: Bytes) -> StorageResult<String> {
        let path = self.key_to_path(key)?;
        self.ensure_parent_dir(&path).await?;

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| StorageError::UploadFailed(format!("{}: {}", path.display(), e)))?;
        file.write_all(&data)
            .await
            .map_err(|e| StorageError::UploadFailed(format!("{}: {}", path.display(), e)))?;
        file.flush()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(key = %key, bytes = data.len(), "Stored blob on local filesystem");

        Ok(key.to_string())
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        let path = self.key_to_path(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::DownloadFailed(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        match fs::metadata(&path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Deleting a missing blob is a no-op by contract.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_put_and_get_round_trip() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new("filesystem", dir.path()).await.unwrap();

        let data = Bytes::from_static(b"test data");
        let key = store.put("test.txt", "text/plain", data.clone()).await.unwrap();
        assert_eq!(key, "test.txt");

        let fetched = store.get(&key).await.unwrap();
        assert_eq!(fetched, data);
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new("filesystem", dir.path()).await.unwrap();

        let result = store.get("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = store.delete("../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = store.exists("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_noop() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new("filesystem", dir.path()).await.unwrap();

        assert!(store.delete("nonexistent.txt").await.is_ok());
    }

    #[tokio::test]
    async fn test_exists() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new("filesystem", dir.path()).await.unwrap();

        assert!(!store.exists("exists.txt").await.unwrap());
        store
            .put("exists.txt", "text/plain", Bytes::from_static(b"x"))
            .await
            .unwrap();
        assert!(store.exists("exists.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_missing_blob() {
        let dir = tempdir().unwrap();
        let store = LocalBlobStore::new("filesystem", dir.path()).await.unwrap();

        let result = store.get("missing.txt").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }
}
