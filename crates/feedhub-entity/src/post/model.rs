//! Post entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A feed post as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    /// Unique post identifier.
    pub id: Uuid,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Storage key of the attached image.
    pub image_url: String,
    /// The user who created the post.
    pub creator_id: Uuid,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
    /// When the post was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A post joined with its creator's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PostDetail {
    /// The post row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub post: Post,
    /// Display name of the creator.
    pub creator_name: String,
}

/// Data required to create a new post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePost {
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Storage key of the attached image.
    pub image_url: String,
    /// The creating user.
    pub creator_id: Uuid,
}

/// Data for replacing a post's editable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePost {
    /// The post ID to update.
    pub id: Uuid,
    /// New title.
    pub title: String,
    /// New body.
    pub content: String,
    /// New image key (may equal the current one).
    pub image_url: String,
}
