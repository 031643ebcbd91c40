//! Shared test helpers: in-memory service wiring, image fixtures, and
//! failure-injecting store doubles.

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageFormat, RgbImage};

use mediavault_core::config::MediaConfig;
use mediavault_core::models::{MediaObject, NewMedia};
use mediavault_services::{
    DeletionService, MemoryMetadataStore, MetadataStore, PersistenceError, RetrievalService,
    UploadService,
};
use mediavault_storage::{BlobStore, MemoryBlobStore, StorageError, StorageResult};

pub fn png_bytes(width: u32, height: u32) -> Bytes {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([10, 20, 30])));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    Bytes::from(buffer)
}

pub fn memory_config() -> MediaConfig {
    MediaConfig {
        provider: "memory".to_string(),
        ..MediaConfig::default()
    }
}

pub struct TestEnv {
    pub blobs: Arc<MemoryBlobStore>,
    pub meta: Arc<MemoryMetadataStore>,
    pub upload: UploadService,
    pub retrieval: RetrievalService,
    pub deletion: DeletionService,
}

pub fn test_env() -> TestEnv {
    test_env_with_config(memory_config())
}

pub fn test_env_with_config(config: MediaConfig) -> TestEnv {
    let blobs = Arc::new(MemoryBlobStore::new("memory"));
    let meta = Arc::new(MemoryMetadataStore::new());
    let upload = UploadService::new(blobs.clone(), meta.clone(), config);
    let retrieval = RetrievalService::new(meta.clone(), "memory");
    let deletion = DeletionService::new(blobs.clone(), meta.clone());
    TestEnv {
        blobs,
        meta,
        upload,
        retrieval,
        deletion,
    }
}

/// Does `name` look like `<stem>_<6 alphanumerics>.<ext>`?
pub fn has_random_suffix(name: &str, stem: &str, ext: &str) -> bool {
    let Some(rest) = name.strip_prefix(stem) else {
        return false;
    };
    let Some(rest) = rest.strip_prefix('_') else {
        return false;
    };
    let Some(suffix) = rest.strip_suffix(&format!(".{}", ext)) else {
        return false;
    };
    suffix.len() == 6 && suffix.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Metadata store whose inserts always fail, for cleanup-path tests.
pub struct FailingInsertStore {
    inner: MemoryMetadataStore,
}

impl FailingInsertStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryMetadataStore::new(),
        }
    }
}

#[async_trait]
impl MetadataStore for FailingInsertStore {
    async fn get_media(&self, id: i64) -> Result<MediaObject, PersistenceError> {
        self.inner.get_media(id).await
    }

    async fn get_media_by_filename(
        &self,
        filename: &str,
        provider: &str,
    ) -> Result<MediaObject, PersistenceError> {
        self.inner.get_media_by_filename(filename, provider).await
    }

    async fn insert_media(&self, _media: NewMedia) -> Result<MediaObject, PersistenceError> {
        Err(PersistenceError::Backend("insert refused".to_string()))
    }

    async fn query_media(
        &self,
        provider: &str,
        filter: &str,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<MediaObject>, u64), PersistenceError> {
        self.inner.query_media(provider, filter, offset, limit).await
    }

    async fn delete_media(&self, id: i64) -> Result<String, PersistenceError> {
        self.inner.delete_media(id).await
    }
}

/// Metadata store that reports a uniqueness conflict for the first
/// `conflicts` inserts, then behaves normally. Simulates a concurrent
/// upload winning the existence-check race.
pub struct ConflictingInsertStore {
    inner: MemoryMetadataStore,
    remaining: AtomicUsize,
}

impl ConflictingInsertStore {
    pub fn new(conflicts: usize) -> Self {
        Self {
            inner: MemoryMetadataStore::new(),
            remaining: AtomicUsize::new(conflicts),
        }
    }
}

#[async_trait]
impl MetadataStore for ConflictingInsertStore {
    async fn get_media(&self, id: i64) -> Result<MediaObject, PersistenceError> {
        self.inner.get_media(id).await
    }

    async fn get_media_by_filename(
        &self,
        filename: &str,
        provider: &str,
    ) -> Result<MediaObject, PersistenceError> {
        self.inner.get_media_by_filename(filename, provider).await
    }

    async fn insert_media(&self, media: NewMedia) -> Result<MediaObject, PersistenceError> {
        let remaining = self.remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(PersistenceError::UniqueViolation(media.filename));
        }
        self.inner.insert_media(media).await
    }

    async fn query_media(
        &self,
        provider: &str,
        filter: &str,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<MediaObject>, u64), PersistenceError> {
        self.inner.query_media(provider, filter, offset, limit).await
    }

    async fn delete_media(&self, id: i64) -> Result<String, PersistenceError> {
        self.inner.delete_media(id).await
    }
}

/// Blob store that refuses to store thumbnail keys, for testing cleanup of
/// the already-stored original.
pub struct ThumbnailRejectingBlobStore {
    inner: MemoryBlobStore,
}

impl ThumbnailRejectingBlobStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryBlobStore::new("memory"),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

#[async_trait]
impl BlobStore for ThumbnailRejectingBlobStore {
    fn provider(&self) -> &str {
        self.inner.provider()
    }

    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<String> {
        if key.starts_with("thumb_") {
            return Err(StorageError::UploadFailed("thumbnail rejected".to_string()));
        }
        self.inner.put(key, content_type, data).await
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        self.inner.get(key).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(key).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.inner.delete(key).await
    }
}
