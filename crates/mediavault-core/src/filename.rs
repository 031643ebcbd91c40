//! Filename sanitization and collision suffixing
//!
//! Client-supplied filenames are untrusted: they may carry path components,
//! traversal sequences, or characters unsafe for storage keys and URLs.
//! This module turns them into safe keys and provides the random suffix
//! used to resolve collisions against existing records.

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::constants::{FILENAME_SUFFIX_LEN, MAX_FILENAME_LENGTH};
use crate::error::AppError;

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Turn an arbitrary client filename into a filesystem/URL-safe storage key.
///
/// Path components are stripped, traversal sequences rejected, and anything
/// outside `[A-Za-z0-9._-]` replaced with `_`. Degenerate input falls back
/// to the literal name `file`.
pub fn sanitize_filename(filename: &str) -> Result<String, AppError> {
    let path = std::path::Path::new(filename);
    let filename_only = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    if filename_only.contains("..") {
        return Err(AppError::InvalidInput(
            "Filename contains invalid path traversal".to_string(),
        ));
    }

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(['_', '.']).is_empty() {
        return Ok("file".to_string());
    }

    Ok(sanitized)
}

/// Lowercase extension of a filename, without the dot. Empty when absent.
pub fn file_extension(filename: &str) -> String {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

/// Insert a suffix before the extension: `report.png` + `a1b2c3` gives
/// `report_a1b2c3.png`. Files without an extension get the suffix appended.
pub fn append_suffix_to_filename(filename: &str, suffix: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}_{}.{}", stem, suffix, ext),
        _ => format!("{}_{}", filename, suffix),
    }
}

/// Generate a fixed-length alphanumeric suffix from OS randomness.
///
/// Fails with `RandomGeneration` when the OS source is unavailable; there
/// is deliberately no fallback to a weaker generator.
pub fn random_suffix() -> Result<String, AppError> {
    let mut bytes = [0u8; FILENAME_SUFFIX_LEN];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AppError::RandomGeneration(e.to_string()))?;

    Ok(bytes
        .iter()
        .map(|b| SUFFIX_CHARSET[*b as usize % SUFFIX_CHARSET.len()] as char)
        .collect())
}
