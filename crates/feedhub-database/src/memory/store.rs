//! In-memory implementation of both store traits.
//!
//! Users and posts live behind a single lock so the user/post relation
//! (creator names, owned post lists) stays consistent.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use feedhub_core::error::AppError;
use feedhub_core::result::AppResult;
use feedhub_core::types::pagination::{PageRequest, PageResponse};
use feedhub_entity::post::{CreatePost, Post, PostDetail, UpdatePost};
use feedhub_entity::user::{CreateUser, DEFAULT_STATUS, UpdateUser, User};

use crate::store::{PostStore, UserStore};

/// A stored user row; owned posts are derived on read.
#[derive(Debug, Clone)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, UserRow>,
    /// Posts in insertion order (oldest first).
    posts: Vec<Post>,
}

impl State {
    fn user(&self, row: &UserRow) -> User {
        User {
            id: row.id,
            email: row.email.clone(),
            name: row.name.clone(),
            password_hash: row.password_hash.clone(),
            status: row.status.clone(),
            posts: self
                .posts
                .iter()
                .filter(|p| p.creator_id == row.id)
                .map(|p| p.id)
                .collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn detail(&self, post: &Post) -> PostDetail {
        PostDetail {
            post: post.clone(),
            creator_name: self
                .users
                .get(&post.creator_id)
                .map(|u| u.name.clone())
                .unwrap_or_default(),
        }
    }
}

/// Store keeping all data in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).map(|row| state.user(row)))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|row| row.email.eq_ignore_ascii_case(email))
            .map(|row| state.user(row)))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        if state
            .users
            .values()
            .any(|row| row.email.eq_ignore_ascii_case(&data.email))
        {
            return Err(AppError::conflict(format!(
                "Email '{}' already exists",
                data.email
            )));
        }

        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            email: data.email.clone(),
            name: data.name.clone(),
            password_hash: data.password_hash.clone(),
            status: DEFAULT_STATUS.to_string(),
            created_at: now,
            updated_at: now,
        };
        let user = state.user(&row);
        state.users.insert(row.id, row);
        Ok(user)
    }

    async fn update(&self, data: &UpdateUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        let row = state
            .users
            .get_mut(&data.id)
            .ok_or_else(|| AppError::not_found("User not found."))?;

        if let Some(name) = &data.name {
            row.name = name.clone();
        }
        if let Some(status) = &data.status {
            row.status = status.clone();
        }
        row.updated_at = Utc::now();

        let row = row.clone();
        Ok(state.user(&row))
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<PostDetail>> {
        let state = self.state.read().await;
        let items = state
            .posts
            .iter()
            .rev()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .map(|p| state.detail(p))
            .collect();
        Ok(PageResponse::new(
            items,
            page.page,
            page.page_size,
            state.posts.len() as u64,
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<PostDetail>> {
        let state = self.state.read().await;
        Ok(state
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|p| state.detail(p)))
    }

    async fn find_by_image(&self, image_url: &str) -> AppResult<Option<PostDetail>> {
        let state = self.state.read().await;
        Ok(state
            .posts
            .iter()
            .find(|p| p.image_url == image_url)
            .map(|p| state.detail(p)))
    }

    async fn create(&self, data: &CreatePost) -> AppResult<PostDetail> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&data.creator_id) {
            return Err(AppError::not_found("Creator not found."));
        }

        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            content: data.content.clone(),
            image_url: data.image_url.clone(),
            creator_id: data.creator_id,
            created_at: now,
            updated_at: now,
        };
        let detail = state.detail(&post);
        state.posts.push(post);
        Ok(detail)
    }

    async fn update(&self, data: &UpdatePost) -> AppResult<PostDetail> {
        let mut state = self.state.write().await;
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == data.id)
            .ok_or_else(|| AppError::not_found("Could not find post."))?;

        post.title = data.title.clone();
        post.content = data.content.clone();
        post.image_url = data.image_url.clone();
        post.updated_at = Utc::now();

        let post = post.clone();
        Ok(state.detail(&post))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let before = state.posts.len();
        state.posts.retain(|p| p.id != id);
        Ok(state.posts.len() < before)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.state.read().await.posts.len() as u64)
    }
}
