//! Data models for the application

mod media;

pub use media::{MediaKind, MediaObject, NewMedia};
