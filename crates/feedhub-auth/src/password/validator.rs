//! Password policy enforcement for new passwords.

use feedhub_core::config::auth::AuthConfig;
use feedhub_core::error::FieldError;

/// Checks new passwords against the configured minimum length.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Minimum accepted length, in characters.
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Check a password; surrounding whitespace does not count.
    ///
    /// Returns the violation as a `password` field error so callers can
    /// merge it with other input errors.
    pub fn check(&self, password: &str) -> Option<FieldError> {
        if password.trim().chars().count() < self.min_length {
            return Some(FieldError::new(
                "password",
                format!(
                    "Password must be at least {} characters long.",
                    self.min_length
                ),
            ));
        }
        None
    }
}
