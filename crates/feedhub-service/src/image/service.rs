//! Upload of post images ahead of a post mutation.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, warn};

use feedhub_core::error::AppError;
use feedhub_database::PostStore;
use feedhub_storage::{ImageStore, key_owner};

use crate::context::RequestContext;

/// An image file received from a client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// File name as sent by the client.
    pub file_name: String,
    /// Declared MIME type.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

impl ImageUpload {
    /// Persist this upload on behalf of `ctx` and return its storage key.
    pub(crate) async fn store(
        self,
        ctx: &RequestContext,
        images: &ImageStore,
    ) -> Result<String, AppError> {
        images
            .store(
                ctx.user_id,
                &self.file_name,
                self.content_type.as_deref(),
                self.data,
            )
            .await
    }
}

/// Fail with an authorization error unless the caller uploaded `key`.
pub(crate) fn require_image_owner(ctx: &RequestContext, key: &str) -> Result<(), AppError> {
    match key_owner(key) {
        Some(owner) if owner == ctx.user_id => Ok(()),
        owner => {
            warn!(
                actor_id = %ctx.user_id,
                owner_id = ?owner,
                key,
                "Rejected use of an image uploaded by another user"
            );
            Err(AppError::authorization("Not authorized!"))
        }
    }
}

/// Clear `key` unless a post still shows it.
pub(crate) async fn clear_unreferenced(posts: &dyn PostStore, images: &ImageStore, key: &str) {
    match posts.find_by_image(key).await {
        Ok(None) => images.clear(key).await,
        Ok(Some(post)) => debug!(key, post_id = %post.post.id, "Image still in use, keeping it"),
        Err(e) => warn!(key, error = %e, "Could not check image references, keeping it"),
    }
}

/// Stores uploaded images and clears the ones they replace.
#[derive(Clone)]
pub struct ImageService {
    posts: Arc<dyn PostStore>,
    images: Arc<ImageStore>,
}

impl ImageService {
    /// Creates a new image service.
    pub fn new(posts: Arc<dyn PostStore>, images: Arc<ImageStore>) -> Self {
        Self { posts, images }
    }

    /// Store `upload` and clear `old_path`.
    ///
    /// Returns `None` when no file was sent. An `old_path` uploaded by
    /// somebody else is refused, attached to a post or not. An `old_path`
    /// still shown by a post is kept until that post is edited.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        upload: Option<ImageUpload>,
        old_path: Option<&str>,
    ) -> Result<Option<String>, AppError> {
        let Some(upload) = upload else {
            return Ok(None);
        };

        let old_path = old_path.map(str::trim).filter(|p| !p.is_empty());
        if let Some(old) = old_path {
            require_image_owner(ctx, old)?;
        }

        let key = upload.store(ctx, &self.images).await?;
        if let Some(old) = old_path {
            clear_unreferenced(self.posts.as_ref(), &self.images, old).await;
        }

        info!(user_id = %ctx.user_id, key = %key, "Image uploaded");
        Ok(Some(key))
    }
}
