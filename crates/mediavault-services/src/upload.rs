//! Media upload orchestration
//!
//! The upload service coordinates two independently-failing subsystems (the
//! blob store and the metadata store) without a shared transaction:
//! validate, resolve the storage name, store the original blob, derive and
//! store a thumbnail for raster images, then persist the metadata record.
//!
//! Every successfully stored blob key is tracked in an ordered list; if any
//! later step fails, the list is drained in reverse issuing deletes so a
//! partial failure never leaves an orphaned blob. A failed cleanup delete
//! is logged and not escalated: the caller sees the triggering error, and
//! the warning marks the residual orphaned-blob risk.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::json;

use mediavault_core::config::MediaConfig;
use mediavault_core::constants::THUMB_PREFIX;
use mediavault_core::error::AppError;
use mediavault_core::filename::{
    append_suffix_to_filename, file_extension, random_suffix, sanitize_filename,
};
use mediavault_core::models::{MediaKind, MediaObject, NewMedia};
use mediavault_processing::{generate_thumbnail, Thumbnail, ThumbnailError};
use mediavault_storage::BlobStore;

use crate::store::{MetadataStore, PersistenceError};

/// Upper bound on store-and-insert attempts when concurrent uploads race
/// on the same filename.
const MAX_INSERT_ATTEMPTS: usize = 3;

/// Outcome of one store-and-insert attempt. A uniqueness conflict at insert
/// time is retryable with a fresh name; anything else is final.
enum AttemptError {
    Conflict(String),
    Failed(AppError),
}

/// Media upload service.
pub struct UploadService {
    blobs: Arc<dyn BlobStore>,
    meta: Arc<dyn MetadataStore>,
    config: MediaConfig,
}

impl UploadService {
    pub fn new(
        blobs: Arc<dyn BlobStore>,
        meta: Arc<dyn MetadataStore>,
        config: MediaConfig,
    ) -> Self {
        Self { blobs, meta, config }
    }

    /// Upload a file: store the original blob, derive a thumbnail for
    /// image types, and persist the metadata record.
    ///
    /// On any failure after the first successful blob store, the already
    /// stored blobs are deleted before the error is returned.
    pub async fn upload(
        &self,
        raw_filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<MediaObject, AppError> {
        let ext = file_extension(raw_filename);
        if !self.config.accepts_extension(&ext) {
            return Err(AppError::UnsupportedType(ext));
        }
        let kind = self.config.classify(&ext);

        let base_name = sanitize_filename(raw_filename)?;

        // Best-effort collision avoidance; the metadata store's uniqueness
        // enforcement at insert time remains authoritative.
        let mut name = base_name.clone();
        let mut checks = 0;
        while self
            .meta
            .get_media_by_filename(&name, self.blobs.provider())
            .await
            .is_ok()
        {
            checks += 1;
            if checks > MAX_INSERT_ATTEMPTS {
                // Let the insert's uniqueness enforcement settle it.
                break;
            }
            name = append_suffix_to_filename(&base_name, &random_suffix()?);
        }

        // The thumbnail is derived once and reused across insert retries.
        let mut thumb_cache: Option<Thumbnail> = None;

        let mut attempt = 1;
        loop {
            let mut stored_keys: Vec<String> = Vec::new();

            match self
                .store_and_persist(&name, content_type, kind, &data, &mut thumb_cache, &mut stored_keys)
                .await
            {
                Ok(media) => {
                    tracing::info!(
                        id = media.id,
                        filename = %media.filename,
                        provider = %media.provider,
                        "Media uploaded"
                    );
                    return Ok(media);
                }
                Err(AttemptError::Conflict(filename)) => {
                    self.cleanup(&stored_keys).await;
                    if attempt >= MAX_INSERT_ATTEMPTS {
                        return Err(AppError::Persistence(format!(
                            "Filename already exists after {} attempts: {}",
                            MAX_INSERT_ATTEMPTS, filename
                        )));
                    }
                    tracing::debug!(
                        filename = %filename,
                        attempt = attempt,
                        "Filename collided at insert time, retrying with a new suffix"
                    );
                    name = append_suffix_to_filename(&base_name, &random_suffix()?);
                    attempt += 1;
                }
                Err(AttemptError::Failed(err)) => {
                    self.cleanup(&stored_keys).await;
                    return Err(err);
                }
            }
        }
    }

    /// One attempt: store the original blob, the thumbnail where
    /// applicable, and insert the metadata record. Stored keys are pushed
    /// onto `stored_keys` as they are created so the caller can compensate
    /// on failure.
    async fn store_and_persist(
        &self,
        name: &str,
        content_type: &str,
        kind: MediaKind,
        data: &Bytes,
        thumb_cache: &mut Option<Thumbnail>,
        stored_keys: &mut Vec<String>,
    ) -> Result<MediaObject, AttemptError> {
        let stored_name = self
            .blobs
            .put(name, content_type, data.clone())
            .await
            .map_err(|e| AttemptError::Failed(AppError::Storage(e.to_string())))?;
        stored_keys.push(stored_name.clone());

        let mut thumbnail_filename = None;
        let mut metadata = json!({});

        match kind {
            MediaKind::Raster => {
                let thumb = match thumb_cache.clone() {
                    Some(thumb) => thumb,
                    None => {
                        let thumb = self.derive_thumbnail(data.clone()).await?;
                        *thumb_cache = Some(thumb.clone());
                        thumb
                    }
                };

                let thumb_key = format!("{}{}", THUMB_PREFIX, stored_name);
                let thumb_stored = self
                    .blobs
                    .put(&thumb_key, content_type, thumb.data.clone())
                    .await
                    .map_err(|e| AttemptError::Failed(AppError::Storage(e.to_string())))?;
                stored_keys.push(thumb_stored.clone());

                thumbnail_filename = Some(thumb_stored);
                metadata = json!({ "width": thumb.width, "height": thumb.height });
            }
            // Vector formats are self-describing; the original blob doubles
            // as its own thumbnail reference.
            MediaKind::Vector => thumbnail_filename = Some(stored_name.clone()),
            MediaKind::Other => {}
        }

        self.meta
            .insert_media(NewMedia {
                filename: stored_name,
                thumbnail_filename,
                content_type: content_type.to_string(),
                metadata,
                provider: self.blobs.provider().to_string(),
            })
            .await
            .map_err(|e| match e {
                PersistenceError::UniqueViolation(filename) => AttemptError::Conflict(filename),
                other => AttemptError::Failed(other.into()),
            })
    }

    /// Decode and resample off the async pool; image work is CPU-bound.
    async fn derive_thumbnail(&self, data: Bytes) -> Result<Thumbnail, AttemptError> {
        let target_width = self.config.thumbnail_width;
        tokio::task::spawn_blocking(move || generate_thumbnail(&data, target_width))
            .await
            .map_err(|e| AttemptError::Failed(AppError::Internal(e.to_string())))?
            .map_err(|e| {
                AttemptError::Failed(match e {
                    ThumbnailError::Decode(msg) => AppError::ImageDecode(msg),
                    ThumbnailError::Encode(msg) => AppError::ImageEncode(msg),
                })
            })
    }

    /// Compensating cleanup: delete stored blobs in reverse order. Delete
    /// failures are logged, never escalated; the triggering error is what
    /// the caller sees.
    async fn cleanup(&self, stored_keys: &[String]) {
        for key in stored_keys.iter().rev() {
            if let Err(err) = self.blobs.delete(key).await {
                tracing::warn!(
                    key = %key,
                    error = %err,
                    "Upload failed and cleanup could not remove blob; blob is orphaned"
                );
            }
        }
    }
}
