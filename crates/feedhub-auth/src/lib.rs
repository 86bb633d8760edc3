//! # feedhub-auth
//!
//! Authentication and authorization primitives for FeedHub.
//!
//! ## Modules
//!
//! - `jwt`: token issuance (fixed one-hour lifetime) and verification
//! - `password`: Argon2id password hashing and length policy
//! - `guard`: post ownership checks

pub mod guard;
pub mod jwt;
pub mod password;

pub use guard::{Owned, require_owner};
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, bearer_token};
pub use password::{PasswordHasher, PasswordValidator};
