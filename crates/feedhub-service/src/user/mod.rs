//! Profile and status of the current user.

pub mod service;

pub use service::{EditUserInput, UserService};
