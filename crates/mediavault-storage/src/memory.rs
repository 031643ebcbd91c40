//! In-memory blob store
//!
//! Reference backend used by tests and demos; holds blobs in a map behind
//! a mutex.

use crate::traits::{BlobStore, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;

struct StoredBlob {
    content_type: String,
    data: Bytes,
}

/// In-memory blob store.
pub struct MemoryBlobStore {
    provider: String,
    blobs: Mutex<HashMap<String, StoredBlob>>,
}

impl MemoryBlobStore {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            blobs: Mutex::new(HashMap::new()),
        }
    }

    /// Number of blobs currently held.
    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Declared content type of a stored blob, if present.
    pub fn content_type(&self, key: &str) -> Option<String> {
        self.blobs
            .lock()
            .unwrap()
            .get(key)
            .map(|b| b.content_type.clone())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider(&self) -> &str {
        &self.provider
    }

    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<String> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(format!(
                "Storage key contains invalid characters: {}",
                key
            )));
        }

        self.blobs.lock().unwrap().insert(
            key.to_string(),
            StoredBlob {
                content_type: content_type.to_string(),
                data,
            },
        );
        Ok(key.to_string())
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        self.blobs
            .lock()
            .unwrap()
            .get(key)
            .map(|b| b.data.clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.blobs.lock().unwrap().contains_key(key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        // Removing a missing key is a no-op by contract.
        self.blobs.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryBlobStore::new("memory");

        let key = store
            .put("a.txt", "text/plain", Bytes::from_static(b"abc"))
            .await
            .unwrap();
        assert_eq!(store.get(&key).await.unwrap(), Bytes::from_static(b"abc"));
        assert_eq!(store.content_type(&key).as_deref(), Some("text/plain"));
        assert!(store.exists(&key).await.unwrap());

        store.delete(&key).await.unwrap();
        assert!(!store.exists(&key).await.unwrap());
        assert!(matches!(
            store.get(&key).await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let store = MemoryBlobStore::new("memory");
        assert!(store.delete("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let store = MemoryBlobStore::new("memory");
        let result = store
            .put("../escape", "text/plain", Bytes::from_static(b"x"))
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
