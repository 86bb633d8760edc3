//! Resource ownership checks.

pub mod ownership;

pub use ownership::{Owned, require_owner};
