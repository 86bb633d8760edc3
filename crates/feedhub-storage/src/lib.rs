//! # feedhub-storage
//!
//! Blob storage for post images: the local filesystem provider and the
//! [`ImageStore`] that validates, names and clears images.

pub mod image_store;
pub mod providers;

pub use image_store::{ImageStore, key_owner};
pub use providers::LocalStorageProvider;
