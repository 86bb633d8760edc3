//! Feed post use cases.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use feedhub_auth::guard::require_owner;
use feedhub_core::config::feed::FeedConfig;
use feedhub_core::error::{AppError, FieldError};
use feedhub_core::events::{DomainEvent, PostEvent};
use feedhub_core::traits::EventPublisher;
use feedhub_core::types::pagination::{PageRequest, PageResponse};
use feedhub_database::{PostStore, UserStore};
use feedhub_entity::post::{CreatePost, UpdatePost};
use feedhub_storage::ImageStore;

use super::input::PostInput;
use super::view::PostView;
use crate::context::RequestContext;
use crate::image::ImageUpload;
use crate::image::service::{clear_unreferenced, require_image_owner};

/// Lists, creates, edits and deletes feed posts.
#[derive(Clone)]
pub struct FeedService {
    users: Arc<dyn UserStore>,
    posts: Arc<dyn PostStore>,
    images: Arc<ImageStore>,
    publisher: Arc<dyn EventPublisher>,
    posts_per_page: u64,
}

impl FeedService {
    /// Creates a new feed service.
    pub fn new(
        users: Arc<dyn UserStore>,
        posts: Arc<dyn PostStore>,
        images: Arc<ImageStore>,
        publisher: Arc<dyn EventPublisher>,
        config: &FeedConfig,
    ) -> Self {
        Self {
            users,
            posts,
            images,
            publisher,
            posts_per_page: config.posts_per_page,
        }
    }

    /// One page of posts, newest first. Pages below 1 read as page 1.
    pub async fn list_posts(&self, page: u64) -> Result<PageResponse<PostView>, AppError> {
        let request = PageRequest::new(page, self.posts_per_page);
        let page = self.posts.list(&request).await?;
        Ok(page.map(PostView::from))
    }

    /// A single post.
    pub async fn get_post(&self, post_id: Uuid) -> Result<PostView, AppError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .map(PostView::from)
            .ok_or_else(|| AppError::not_found("Could not find post."))
    }

    /// Create a post owned by the caller.
    ///
    /// The image is either `upload` or the key in `input.image_url`; a
    /// post without one is rejected, as is a key uploaded by someone else.
    pub async fn create_post(
        &self,
        ctx: &RequestContext,
        input: PostInput,
        upload: Option<ImageUpload>,
    ) -> Result<PostView, AppError> {
        let input = input.normalized();
        reject_invalid(input.field_errors())?;
        if upload.is_none() && input.image_url.is_none() {
            return Err(missing_image("No image provided."));
        }

        if self.users.find_by_id(ctx.user_id).await?.is_none() {
            return Err(AppError::authentication("Not authenticated."));
        }

        let (image_url, stored_here) = match upload {
            Some(upload) => (upload.store(ctx, &self.images).await?, true),
            None => {
                let key = input.image_url.unwrap_or_default();
                self.ensure_image_exists(&key).await?;
                require_image_owner(ctx, &key)?;
                (key, false)
            }
        };

        let created = self
            .posts
            .create(&CreatePost {
                title: input.title,
                content: input.content,
                image_url: image_url.clone(),
                creator_id: ctx.user_id,
            })
            .await;
        let detail = match created {
            Ok(detail) => detail,
            Err(e) => {
                if stored_here {
                    self.images.clear(&image_url).await;
                }
                return Err(e);
            }
        };

        let view = PostView::from(detail);
        info!(user_id = %ctx.user_id, post_id = %view.id, "Post created");
        let post_id = view.id;
        self.publish(ctx, |post| PostEvent::Created { post_id, post }, &view)
            .await;
        Ok(view)
    }

    /// Replace a post's title, content and image. Only the creator may
    /// edit; a replaced image no other post shows is cleared.
    pub async fn update_post(
        &self,
        ctx: &RequestContext,
        post_id: Uuid,
        input: PostInput,
        upload: Option<ImageUpload>,
    ) -> Result<PostView, AppError> {
        let input = input.normalized();
        reject_invalid(input.field_errors())?;
        if upload.is_none() && input.image_url.is_none() {
            return Err(missing_image("No file picked."));
        }

        let existing = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Could not find post."))?;
        require_owner(ctx.user_id, &existing)?;

        let old_image = existing.post.image_url;
        let (image_url, stored_here) = match upload {
            Some(upload) => (upload.store(ctx, &self.images).await?, true),
            None => {
                let key = input.image_url.unwrap_or_default();
                if key != old_image {
                    self.ensure_image_exists(&key).await?;
                    require_image_owner(ctx, &key)?;
                }
                (key, false)
            }
        };

        let updated = self
            .posts
            .update(&UpdatePost {
                id: post_id,
                title: input.title,
                content: input.content,
                image_url: image_url.clone(),
            })
            .await;
        let detail = match updated {
            Ok(detail) => detail,
            Err(e) => {
                if stored_here {
                    self.images.clear(&image_url).await;
                }
                return Err(e);
            }
        };

        if image_url != old_image {
            clear_unreferenced(self.posts.as_ref(), &self.images, &old_image).await;
        }

        let view = PostView::from(detail);
        info!(user_id = %ctx.user_id, post_id = %post_id, "Post updated");
        self.publish(ctx, |post| PostEvent::Updated { post_id, post }, &view)
            .await;
        Ok(view)
    }

    /// Delete a post and its image, unless another post shows the same
    /// image. Only the creator may delete.
    pub async fn delete_post(&self, ctx: &RequestContext, post_id: Uuid) -> Result<(), AppError> {
        let existing = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Could not find post."))?;
        require_owner(ctx.user_id, &existing)?;

        if !self.posts.delete(post_id).await? {
            return Err(AppError::not_found("Could not find post."));
        }
        clear_unreferenced(self.posts.as_ref(), &self.images, &existing.post.image_url).await;

        info!(user_id = %ctx.user_id, post_id = %post_id, "Post deleted");
        self.publisher
            .publish(DomainEvent::post(ctx.user_id, PostEvent::Deleted { post_id }))
            .await;
        Ok(())
    }

    async fn ensure_image_exists(&self, key: &str) -> Result<(), AppError> {
        if self.images.exists(key).await? {
            Ok(())
        } else {
            Err(AppError::invalid_fields(
                "Validation failed.",
                vec![FieldError::new("image_url", "Image not found.")],
            ))
        }
    }

    async fn publish(
        &self,
        ctx: &RequestContext,
        make: impl FnOnce(serde_json::Value) -> PostEvent,
        view: &PostView,
    ) {
        match serde_json::to_value(view) {
            Ok(post) => {
                self.publisher
                    .publish(DomainEvent::post(ctx.user_id, make(post)))
                    .await
            }
            Err(e) => warn!(post_id = %view.id, error = %e, "Failed to serialize post event"),
        }
    }
}

fn reject_invalid(errors: Vec<FieldError>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::invalid_fields(
            "Validation failed, entered data is incorrect.",
            errors,
        ))
    }
}

fn missing_image(message: &str) -> AppError {
    AppError::invalid_fields(message, vec![FieldError::new("image", message)])
}
