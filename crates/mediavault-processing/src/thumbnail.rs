//! Thumbnail generation
//!
//! Decodes a raster image, resizes it to a fixed target width preserving
//! aspect ratio, and re-encodes it as PNG regardless of the input format.
//! The reported dimensions are those of the *original* image, not the
//! thumbnail; they are what gets recorded as image metadata.

use bytes::Bytes;
use image::imageops::FilterType;
use image::{GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;
use thiserror::Error;

/// Thumbnail generation errors
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode thumbnail: {0}")]
    Encode(String),
}

/// Encoded thumbnail plus the original image's dimensions.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    /// PNG-encoded thumbnail bytes.
    pub data: Bytes,
    /// Width of the original image in pixels.
    pub width: u32,
    /// Height of the original image in pixels.
    pub height: u32,
}

/// Generate a PNG thumbnail of `target_width` from raw raster image bytes.
///
/// Images narrower than the target are never upscaled; their thumbnail
/// keeps the original dimensions. Otherwise the height is computed
/// proportionally (`round(target × H / W)`, minimum 1) and the image is
/// resampled with a Lanczos3 filter.
///
/// This is CPU-bound work; callers on an async runtime should run it under
/// `tokio::task::spawn_blocking`.
pub fn generate_thumbnail(data: &[u8], target_width: u32) -> Result<Thumbnail, ThumbnailError> {
    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ThumbnailError::Decode(e.to_string()))?
        .decode()
        .map_err(|e| ThumbnailError::Decode(e.to_string()))?;

    let (width, height) = img.dimensions();

    let thumb = if width <= target_width {
        img
    } else {
        let target_height =
            (((target_width as u64 * height as u64) as f64 / width as f64).round() as u32).max(1);
        img.resize_exact(target_width, target_height, FilterType::Lanczos3)
    };

    let mut buffer = Vec::new();
    thumb
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| ThumbnailError::Encode(e.to_string()))?;

    Ok(Thumbnail {
        data: Bytes::from(buffer),
        width,
        height,
    })
}
