//! Stand-alone image uploads.

pub mod service;

pub use service::{ImageService, ImageUpload};
