//! Shared constants

/// Key prefix for stored thumbnail blobs (`thumb_<original key>`).
pub const THUMB_PREFIX: &str = "thumb_";

/// Target width in pixels for generated thumbnails.
pub const THUMBNAIL_WIDTH: u32 = 250;

/// Length of the random alphanumeric suffix appended to colliding filenames.
pub const FILENAME_SUFFIX_LEN: usize = 6;

/// Maximum length of a sanitized filename.
pub const MAX_FILENAME_LENGTH: usize = 255;
