//! Mediavault Core Library
//!
//! This crate provides the core domain models, error types, configuration,
//! and filename handling shared across all mediavault components.

pub mod config;
pub mod constants;
pub mod error;
pub mod filename;
pub mod models;

// Re-export commonly used types
pub use config::MediaConfig;
pub use error::{AppError, LogLevel};
pub use models::{MediaKind, MediaObject, NewMedia};
