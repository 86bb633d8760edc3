//! # feedhub-core
//!
//! Core crate for FeedHub. Contains configuration schemas, domain events,
//! pagination types, the storage and event-publishing traits, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other FeedHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind, FieldError};
pub use result::AppResult;
