//! Account creation and credential checks.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use feedhub_auth::jwt::JwtEncoder;
use feedhub_auth::password::{PasswordHasher, PasswordValidator};
use feedhub_core::error::{AppError, ErrorKind, FieldError, field_errors_from};
use feedhub_database::UserStore;
use feedhub_entity::user::{CreateUser, User};

const DUPLICATE_EMAIL: &str = "E-Mail address already exists!";

/// Signup form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupInput {
    /// Email address; stored trimmed and lower-cased.
    #[validate(email(message = "Please enter a valid email."))]
    pub email: String,
    /// Display name; stored trimmed.
    #[validate(length(min = 1, message = "Name must not be empty."))]
    pub name: String,
    /// Plaintext password.
    pub password: String,
}

impl SignupInput {
    fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_lowercase(),
            name: self.name.trim().to_string(),
            password: self.password,
        }
    }
}

/// A successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    /// Signed bearer token.
    pub token: String,
    /// The logged-in user.
    pub user_id: Uuid,
    /// When `token` expires.
    pub expires_at: DateTime<Utc>,
}

/// Handles signup and login.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    password_validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        password_validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            password_validator,
            encoder,
        }
    }

    /// Register a new user.
    ///
    /// All input problems are reported together as field errors.
    pub async fn signup(&self, input: SignupInput) -> Result<User, AppError> {
        let input = input.normalized();

        let mut errors = match input.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors_from(&e),
        };
        if let Some(err) = self.password_validator.check(&input.password) {
            errors.push(err);
        }
        if !errors.iter().any(|e| e.field == "email")
            && self.users.find_by_email(&input.email).await?.is_some()
        {
            errors.push(FieldError::new("email", DUPLICATE_EMAIL));
        }
        if !errors.is_empty() {
            return Err(AppError::invalid_fields("Validation failed.", errors));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .users
            .create(&CreateUser {
                email: input.email,
                name: input.name,
                password_hash,
            })
            .await
            .map_err(|e| match e.kind {
                // Lost a race with a concurrent signup for the same address.
                ErrorKind::Conflict => AppError::invalid_fields(
                    "Validation failed.",
                    vec![FieldError::new("email", DUPLICATE_EMAIL)],
                ),
                _ => e,
            })?;

        info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    /// Check credentials and issue a one-hour token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = self
            .users
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or_else(|| {
                warn!("Login attempt for unknown email");
                AppError::authentication("A user with this email could not be found.")
            })?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication("Wrong password!"));
        }

        let issued = self.encoder.issue(user.id, &user.email)?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginResult {
            token: issued.token,
            user_id: user.id,
            expires_at: issued.expires_at,
        })
    }
}
