//! Mediavault Storage Library
//!
//! This crate provides the blob store abstraction and its backends. Blobs
//! are addressed by string keys derived from sanitized filenames; keys must
//! not contain `..` or a leading `/`.

pub mod factory;
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_blob_store;
pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;
pub use traits::{BlobStore, StorageError, StorageResult};
