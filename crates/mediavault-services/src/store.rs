//! Metadata store port
//!
//! This module defines the `MetadataStore` trait the services persist media
//! records through. Backends are expected to enforce filename uniqueness
//! among live records themselves; the upload service's existence check is a
//! best-effort optimization, and `UniqueViolation` from `insert_media` is
//! the authoritative collision signal.

use async_trait::async_trait;
use mediavault_core::error::AppError;
use mediavault_core::models::{MediaObject, NewMedia};
use thiserror::Error;

/// Metadata store operation errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Media not found")]
    NotFound,

    #[error("Filename already exists: {0}")]
    UniqueViolation(String),

    #[error("Metadata store error: {0}")]
    Backend(String),
}

impl From<PersistenceError> for AppError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound => AppError::NotFound("Media not found".to_string()),
            other => AppError::Persistence(other.to_string()),
        }
    }
}

/// Metadata store abstraction trait
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Fetch a single media record by id.
    async fn get_media(&self, id: i64) -> Result<MediaObject, PersistenceError>;

    /// Fetch a single media record by exact filename within a provider.
    async fn get_media_by_filename(
        &self,
        filename: &str,
        provider: &str,
    ) -> Result<MediaObject, PersistenceError>;

    /// Insert a media record, assigning its id. Fails with
    /// `UniqueViolation` when the filename is already taken by a live
    /// record.
    async fn insert_media(&self, media: NewMedia) -> Result<MediaObject, PersistenceError>;

    /// Filtered, paginated listing of records for a provider. Returns the
    /// page of items plus the total match count before pagination.
    /// Ordering is deterministic (ascending id).
    async fn query_media(
        &self,
        provider: &str,
        filter: &str,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<MediaObject>, u64), PersistenceError>;

    /// Delete a media record by id, returning its filename so the caller
    /// can remove the associated blobs.
    async fn delete_media(&self, id: i64) -> Result<String, PersistenceError>;
}
