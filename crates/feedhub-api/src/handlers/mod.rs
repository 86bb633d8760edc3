//! Request handlers, one module per route group.

pub mod auth;
pub mod feed;
pub mod graphql;
pub mod health;
pub mod image;
pub mod user;
pub mod ws;
