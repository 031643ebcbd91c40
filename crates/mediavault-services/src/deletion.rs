//! Media deletion
//!
//! Removes the metadata record first, then issues best-effort blob deletes
//! for the original and the conventionally-derived thumbnail key. Once the
//! metadata row is gone the operation has succeeded: blob-delete failures
//! are logged but not surfaced, favoring metadata consistency over blob
//! store cleanliness.

use std::sync::Arc;

use mediavault_core::constants::THUMB_PREFIX;
use mediavault_core::error::AppError;
use mediavault_storage::BlobStore;

use crate::store::MetadataStore;

/// Media deletion service.
pub struct DeletionService {
    blobs: Arc<dyn BlobStore>,
    meta: Arc<dyn MetadataStore>,
}

impl DeletionService {
    pub fn new(blobs: Arc<dyn BlobStore>, meta: Arc<dyn MetadataStore>) -> Self {
        Self { blobs, meta }
    }

    /// Delete a media record and its blobs.
    ///
    /// The thumbnail key is derived by convention and deleted regardless of
    /// whether the record ever had a thumbnail; the blob store treats
    /// deleting a missing key as a no-op.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if id < 1 {
            return Err(AppError::InvalidId(id));
        }

        let filename = self.meta.delete_media(id).await?;

        for key in [filename.clone(), format!("{}{}", THUMB_PREFIX, filename)] {
            if let Err(err) = self.blobs.delete(&key).await {
                tracing::warn!(
                    id = id,
                    key = %key,
                    error = %err,
                    "Media record deleted but blob removal failed; blob is orphaned"
                );
            }
        }

        tracing::info!(id = id, filename = %filename, "Media deleted");

        Ok(())
    }
}
