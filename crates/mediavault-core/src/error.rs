//! Error types module
//!
//! This module provides the unified error type used throughout mediavault.
//! All failures surfaced by the services are represented by the `AppError`
//! enum; per-layer errors (storage, image processing, persistence) are
//! converted into it at the service boundary.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    #[error("Failed to encode thumbnail: {0}")]
    ImageEncode(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid id: {0}")]
    InvalidId(i64),

    #[error("Secure random generation failed: {0}")]
    RandomGeneration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, log_level).
/// Kept in one place so the accessors below cannot drift apart.
fn static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", LogLevel::Debug),
        AppError::UnsupportedType(_) => (400, "UNSUPPORTED_TYPE", LogLevel::Debug),
        AppError::Storage(_) => (500, "STORAGE_ERROR", LogLevel::Error),
        AppError::ImageDecode(_) => (400, "IMAGE_DECODE_ERROR", LogLevel::Warn),
        AppError::ImageEncode(_) => (500, "IMAGE_ENCODE_ERROR", LogLevel::Error),
        AppError::Persistence(_) => (500, "PERSISTENCE_ERROR", LogLevel::Error),
        AppError::NotFound(_) => (404, "NOT_FOUND", LogLevel::Debug),
        AppError::InvalidId(_) => (400, "INVALID_ID", LogLevel::Debug),
        AppError::RandomGeneration(_) => (500, "RANDOM_GENERATION_ERROR", LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl AppError {
    /// HTTP status code a transport layer should map this error to.
    pub fn http_status_code(&self) -> u16 {
        static_metadata(self).0
    }

    /// Machine-readable error code (e.g., "STORAGE_ERROR").
    pub fn error_code(&self) -> &'static str {
        static_metadata(self).1
    }

    /// Log level for this error.
    pub fn log_level(&self) -> LogLevel {
        static_metadata(self).2
    }
}
