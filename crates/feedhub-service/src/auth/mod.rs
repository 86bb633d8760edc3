//! Signup and login.

pub mod service;

pub use service::{AuthService, LoginResult, SignupInput};
