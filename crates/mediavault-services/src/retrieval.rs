//! Media retrieval
//!
//! Pure reads: single-item fetch by id and filtered, paginated listing.

use std::sync::Arc;

use mediavault_core::error::AppError;
use mediavault_core::models::MediaObject;

use crate::store::MetadataStore;

/// One page of media records plus the total match count.
#[derive(Debug, Clone)]
pub struct MediaListing {
    pub items: Vec<MediaObject>,
    pub total: u64,
}

/// Media retrieval service, scoped to a single provider.
pub struct RetrievalService {
    meta: Arc<dyn MetadataStore>,
    provider: String,
}

impl RetrievalService {
    pub fn new(meta: Arc<dyn MetadataStore>, provider: impl Into<String>) -> Self {
        Self {
            meta,
            provider: provider.into(),
        }
    }

    /// Fetch a single media record by id.
    pub async fn get_one(&self, id: i64) -> Result<MediaObject, AppError> {
        Ok(self.meta.get_media(id).await?)
    }

    /// Filtered, paginated listing ordered by ascending id.
    pub async fn query(
        &self,
        filter: &str,
        offset: usize,
        limit: usize,
    ) -> Result<MediaListing, AppError> {
        let (items, total) = self
            .meta
            .query_media(&self.provider, filter, offset, limit)
            .await?;
        Ok(MediaListing { items, total })
    }
}
