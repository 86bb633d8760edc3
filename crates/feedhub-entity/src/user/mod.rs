//! User domain entities.

pub mod model;

pub use model::{CreateUser, DEFAULT_STATUS, UpdateUser, User};
