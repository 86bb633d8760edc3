//! Store traits and backend selection.
//!
//! Services depend on these traits only; [`Stores::from_config`] picks
//! the PostgreSQL repositories or the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use feedhub_core::config::database::DatabaseConfig;
use feedhub_core::error::AppError;
use feedhub_core::result::AppResult;
use feedhub_core::types::pagination::{PageRequest, PageResponse};
use feedhub_entity::post::{CreatePost, PostDetail, UpdatePost};
use feedhub_entity::user::{CreateUser, UpdateUser, User};

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::repositories::post::PgPostRepository;
use crate::repositories::user::PgUserRepository;

/// Persistence operations on users.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user. A taken email yields a conflict error.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Apply the non-`None` fields of `data`.
    async fn update(&self, data: &UpdateUser) -> AppResult<User>;

    /// Replace a user's status line.
    async fn update_status(&self, id: Uuid, status: &str) -> AppResult<User> {
        self.update(&UpdateUser {
            id,
            name: None,
            status: Some(status.to_string()),
        })
        .await
    }
}

/// Persistence operations on posts.
#[async_trait]
pub trait PostStore: Send + Sync + 'static {
    /// List posts newest first, with the total count.
    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<PostDetail>>;

    /// Find a post by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PostDetail>>;

    /// Find the post whose image is stored under `image_url`.
    async fn find_by_image(&self, image_url: &str) -> AppResult<Option<PostDetail>>;

    /// Create a new post.
    async fn create(&self, data: &CreatePost) -> AppResult<PostDetail>;

    /// Replace a post's editable fields. A missing post yields not-found.
    async fn update(&self, data: &UpdatePost) -> AppResult<PostDetail>;

    /// Delete a post. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Count all posts.
    async fn count(&self) -> AppResult<u64>;
}

/// The configured store backends.
#[derive(Clone)]
pub struct Stores {
    /// User store.
    pub users: Arc<dyn UserStore>,
    /// Post store.
    pub posts: Arc<dyn PostStore>,
    /// The PostgreSQL pool, when that backend is active.
    pub pool: Option<DatabasePool>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores")
            .field("backend", &self.backend())
            .finish()
    }
}

impl Stores {
    /// Build the stores named by `config.provider`.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                let pool = DatabasePool::connect(config).await?;
                Ok(Self {
                    users: Arc::new(PgUserRepository::new(pool.pool().clone())),
                    posts: Arc::new(PgPostRepository::new(pool.pool().clone())),
                    pool: Some(pool),
                })
            }
            "memory" => {
                info!("Using in-memory store; data is lost on restart");
                Ok(Self::in_memory())
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: {other}"
            ))),
        }
    }

    /// Stores backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: Arc::clone(&store) as Arc<dyn UserStore>,
            posts: store as Arc<dyn PostStore>,
            pool: None,
        }
    }

    /// Name of the active backend.
    pub fn backend(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    /// Check backend connectivity.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }
}
