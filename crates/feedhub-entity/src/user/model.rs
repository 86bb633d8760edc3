//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status text given to every newly registered user.
pub const DEFAULT_STATUS: &str = "I am new!";

/// A registered feed author.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique, lower-cased email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Free-form status line.
    pub status: String,
    /// IDs of the posts this user created, oldest first.
    pub posts: Vec<Uuid>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Normalized email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Pre-hashed password.
    pub password_hash: String,
}

/// Data for updating an existing user's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// The user ID to update.
    pub id: Uuid,
    /// New display name.
    pub name: Option<String>,
    /// New status line.
    pub status: Option<String>,
}
