//! # feedhub-entity
//!
//! Domain entity models for FeedHub. Every struct in this crate
//! represents a database row or the input used to create or change one.
//! Database entities derive `sqlx::FromRow`.

pub mod post;
pub mod user;
