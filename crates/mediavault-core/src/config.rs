//! Configuration module
//!
//! Configuration surface consumed by the media services: the upload
//! extension allowlist, the blob store provider name, the thumbnail target
//! width, and the raster/vector extension sets that decide the thumbnail
//! strategy.

use std::env;

use crate::constants::THUMBNAIL_WIDTH;
use crate::models::MediaKind;

/// Media upload and thumbnailing configuration.
#[derive(Clone, Debug)]
pub struct MediaConfig {
    /// Identifier of the blob store backend new uploads are written to.
    pub provider: String,
    /// Allowed upload extensions; `["*"]` accepts any extension.
    pub extensions: Vec<String>,
    /// Target width in pixels for generated thumbnails.
    pub thumbnail_width: u32,
    /// Extensions decoded and resampled into a PNG thumbnail.
    pub raster_extensions: Vec<String>,
    /// Resolution-independent extensions that reuse the original blob as
    /// their own thumbnail reference.
    pub vector_extensions: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            provider: "filesystem".to_string(),
            extensions: vec!["*".to_string()],
            thumbnail_width: THUMBNAIL_WIDTH,
            raster_extensions: split_list("gif,png,jpg,jpeg"),
            vector_extensions: split_list("svg"),
        }
    }
}

impl MediaConfig {
    /// Build configuration from `MEDIA_*` environment variables, falling
    /// back to the defaults above for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: env::var("MEDIA_PROVIDER").unwrap_or(defaults.provider),
            extensions: env::var("MEDIA_EXTENSIONS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.extensions),
            thumbnail_width: env::var("MEDIA_THUMBNAIL_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.thumbnail_width),
            raster_extensions: env::var("MEDIA_RASTER_EXTENSIONS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.raster_extensions),
            vector_extensions: env::var("MEDIA_VECTOR_EXTENSIONS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.vector_extensions),
        }
    }

    /// Whether the allowlist accepts the given lowercase extension.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == "*")
            || self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Classify an extension for thumbnail purposes.
    pub fn classify(&self, ext: &str) -> MediaKind {
        if self.raster_extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
            MediaKind::Raster
        } else if self.vector_extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
            MediaKind::Vector
        } else {
            MediaKind::Other
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
