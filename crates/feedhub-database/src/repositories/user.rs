//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use feedhub_core::error::{AppError, ErrorKind};
use feedhub_core::result::AppResult;
use feedhub_entity::user::{CreateUser, UpdateUser, User};

use crate::store::UserStore;

/// Selects a user together with the IDs of the posts they created.
const SELECT_USER: &str = "SELECT u.*, \
     ARRAY(SELECT p.id FROM posts p WHERE p.creator_id = u.id ORDER BY p.created_at) AS posts \
     FROM users u";

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE u.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!("{SELECT_USER} WHERE LOWER(u.email) = LOWER($1)"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, name, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING *, ARRAY[]::uuid[] AS posts",
        )
        .bind(&data.email)
        .bind(&data.name)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict(format!("Email '{}' already exists", data.email))
            }
            other => AppError::with_source(ErrorKind::Database, "Failed to create user", other),
        })
    }

    async fn update(&self, data: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users u SET \
             name = COALESCE($2, u.name), \
             status = COALESCE($3, u.status), \
             updated_at = NOW() \
             WHERE u.id = $1 \
             RETURNING u.*, \
             ARRAY(SELECT p.id FROM posts p WHERE p.creator_id = u.id ORDER BY p.created_at) AS posts",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(&data.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
        .ok_or_else(|| AppError::not_found("User not found."))
    }
}
