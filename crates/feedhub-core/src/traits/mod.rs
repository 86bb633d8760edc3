//! Core traits defined in `feedhub-core` and implemented by other crates.

pub mod events;
pub mod storage;

pub use events::EventPublisher;
pub use storage::StorageProvider;
