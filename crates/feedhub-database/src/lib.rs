//! # feedhub-database
//!
//! Persistence for FeedHub: the [`UserStore`] and [`PostStore`] traits,
//! their PostgreSQL repositories, an in-memory implementation and the
//! migration runner.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{PostStore, Stores, UserStore};
