//! Blob store abstraction trait
//!
//! This module defines the `BlobStore` trait that all storage backends must
//! implement.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Blob not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Blob store abstraction trait
///
/// All backends (local filesystem, in-memory) implement this trait so the
/// upload and deletion services can work against any backend without
/// coupling to implementation details.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Identifier of this backend, recorded on media records so blobs can
    /// be located when multiple backends coexist.
    fn provider(&self) -> &str;

    /// Store a blob under the given key and return the authoritative stored
    /// key. Backends may rename for their own reasons, so callers must use
    /// the returned key, not the one they passed in.
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<String>;

    /// Fetch a blob by key.
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Check whether a blob exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Delete a blob by key. Deleting a key that does not exist is a no-op,
    /// not an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}
