//! Post repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use feedhub_core::error::{AppError, ErrorKind};
use feedhub_core::result::AppResult;
use feedhub_core::types::pagination::{PageRequest, PageResponse};
use feedhub_entity::post::{CreatePost, PostDetail, UpdatePost};

use crate::store::PostStore;

/// PostgreSQL-backed [`PostStore`].
#[derive(Debug, Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new post repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostRepository {
    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<PostDetail>> {
        let total = self.count().await?;

        let posts = sqlx::query_as::<_, PostDetail>(
            "SELECT p.*, u.name AS creator_name FROM posts p \
             JOIN users u ON u.id = p.creator_id \
             ORDER BY p.created_at DESC, p.id DESC LIMIT $1 OFFSET $2",
        )
        .bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list posts", e))?;

        Ok(PageResponse::new(posts, page.page, page.page_size, total))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PostDetail>> {
        sqlx::query_as::<_, PostDetail>(
            "SELECT p.*, u.name AS creator_name FROM posts p \
             JOIN users u ON u.id = p.creator_id WHERE p.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find post by id", e))
    }

    async fn find_by_image(&self, image_url: &str) -> AppResult<Option<PostDetail>> {
        sqlx::query_as::<_, PostDetail>(
            "SELECT p.*, u.name AS creator_name FROM posts p \
             JOIN users u ON u.id = p.creator_id WHERE p.image_url = $1 LIMIT 1",
        )
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find post by image", e)
        })
    }

    async fn create(&self, data: &CreatePost) -> AppResult<PostDetail> {
        sqlx::query_as::<_, PostDetail>(
            "WITH inserted AS ( \
                 INSERT INTO posts (title, content, image_url, creator_id) \
                 VALUES ($1, $2, $3, $4) RETURNING * \
             ) \
             SELECT i.*, u.name AS creator_name FROM inserted i \
             JOIN users u ON u.id = i.creator_id",
        )
        .bind(&data.title)
        .bind(&data.content)
        .bind(&data.image_url)
        .bind(data.creator_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("posts_creator_id_fkey") =>
            {
                AppError::not_found("Creator not found.")
            }
            other => AppError::with_source(ErrorKind::Database, "Failed to create post", other),
        })
    }

    async fn update(&self, data: &UpdatePost) -> AppResult<PostDetail> {
        sqlx::query_as::<_, PostDetail>(
            "WITH updated AS ( \
                 UPDATE posts SET title = $2, content = $3, image_url = $4, updated_at = NOW() \
                 WHERE id = $1 RETURNING * \
             ) \
             SELECT d.*, u.name AS creator_name FROM updated d \
             JOIN users u ON u.id = d.creator_id",
        )
        .bind(data.id)
        .bind(&data.title)
        .bind(&data.content)
        .bind(&data.image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update post", e))?
        .ok_or_else(|| AppError::not_found("Could not find post."))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete post", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count posts", e))?;
        Ok(total as u64)
    }
}
