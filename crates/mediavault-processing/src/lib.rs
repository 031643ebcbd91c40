//! Mediavault Processing Library
//!
//! Image processing for uploads: decoding raster images and producing the
//! fixed-width PNG thumbnail derivative.

pub mod thumbnail;

pub use thumbnail::{generate_thumbnail, Thumbnail, ThumbnailError};
