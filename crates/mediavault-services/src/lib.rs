//! Mediavault Services Library
//!
//! The media services: upload orchestration with compensating cleanup,
//! retrieval, and deletion, built on the blob store and metadata store
//! ports.

pub mod deletion;
pub mod memory;
pub mod retrieval;
pub mod store;
pub mod upload;

// Re-export commonly used types
pub use deletion::DeletionService;
pub use memory::MemoryMetadataStore;
pub use retrieval::{MediaListing, RetrievalService};
pub use store::{MetadataStore, PersistenceError};
pub use upload::UploadService;
