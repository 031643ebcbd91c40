use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// How an uploaded file is treated for thumbnail purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Pixel-based image; a resized PNG derivative is generated.
    Raster,
    /// Resolution-independent image; the original doubles as its own thumbnail.
    Vector,
    /// No thumbnail concept.
    Other,
}

/// Persistent record of an uploaded asset.
///
/// Created only by the upload service after all blobs are durably stored.
/// `filename` is the storage key of the original blob and is unique among
/// live records; `thumbnail_filename` is `None` for non-image uploads and
/// equal to `filename` for vector formats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaObject {
    pub id: i64,
    pub filename: String,
    pub thumbnail_filename: Option<String>,
    pub content_type: String,
    /// Open key/value map; `{"width": W, "height": H}` of the original
    /// image for raster uploads, empty otherwise.
    pub metadata: JsonValue,
    /// Identifier of the blob store backend holding the blobs.
    pub provider: String,
    pub uploaded_at: DateTime<Utc>,
}

impl MediaObject {
    /// Whether this record references a stored thumbnail derivative
    /// distinct from the original blob.
    pub fn has_derived_thumbnail(&self) -> bool {
        match &self.thumbnail_filename {
            Some(thumb) => thumb != &self.filename,
            None => false,
        }
    }
}

/// Insert payload for a new media record; the metadata store assigns
/// `id` and `uploaded_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMedia {
    pub filename: String,
    pub thumbnail_filename: Option<String>,
    pub content_type: String,
    pub metadata: JsonValue,
    pub provider: String,
}
