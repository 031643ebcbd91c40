//! In-memory metadata store
//!
//! Reference backend for the `MetadataStore` port. Enforces filename
//! uniqueness among live records and assigns monotonically increasing ids,
//! so it exercises the same contract a SQL backend with a unique constraint
//! would.

use crate::store::{MetadataStore, PersistenceError};
use async_trait::async_trait;
use chrono::Utc;
use mediavault_core::models::{MediaObject, NewMedia};
use std::collections::BTreeMap;
use std::sync::Mutex;

struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, MediaObject>,
}

/// In-memory metadata store.
pub struct MemoryMetadataStore {
    inner: Mutex<Inner>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryMetadataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn get_media(&self, id: i64) -> Result<MediaObject, PersistenceError> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .get(&id)
            .cloned()
            .ok_or(PersistenceError::NotFound)
    }

    async fn get_media_by_filename(
        &self,
        filename: &str,
        provider: &str,
    ) -> Result<MediaObject, PersistenceError> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .values()
            .find(|m| m.filename == filename && m.provider == provider)
            .cloned()
            .ok_or(PersistenceError::NotFound)
    }

    async fn insert_media(&self, media: NewMedia) -> Result<MediaObject, PersistenceError> {
        let mut inner = self.inner.lock().unwrap();

        if inner.rows.values().any(|m| m.filename == media.filename) {
            return Err(PersistenceError::UniqueViolation(media.filename));
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let object = MediaObject {
            id,
            filename: media.filename,
            thumbnail_filename: media.thumbnail_filename,
            content_type: media.content_type,
            metadata: media.metadata,
            provider: media.provider,
            uploaded_at: Utc::now(),
        };
        inner.rows.insert(id, object.clone());

        Ok(object)
    }

    async fn query_media(
        &self,
        provider: &str,
        filter: &str,
        offset: usize,
        limit: usize,
    ) -> Result<(Vec<MediaObject>, u64), PersistenceError> {
        let inner = self.inner.lock().unwrap();
        let needle = filter.to_lowercase();

        // BTreeMap iteration gives ascending id order, so pagination over a
        // fixed data set is deterministic.
        let matched: Vec<&MediaObject> = inner
            .rows
            .values()
            .filter(|m| m.provider == provider)
            .filter(|m| needle.is_empty() || m.filename.to_lowercase().contains(&needle))
            .collect();

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((items, total))
    }

    async fn delete_media(&self, id: i64) -> Result<String, PersistenceError> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .remove(&id)
            .map(|m| m.filename)
            .ok_or(PersistenceError::NotFound)
    }
}
