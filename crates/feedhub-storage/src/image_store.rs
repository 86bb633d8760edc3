//! Post image storage.
//!
//! Images are stored under `images/<uploader id>/<uuid>-<sanitized name>`
//! and referenced by that key from posts. The uploader id in the key is
//! what decides who may attach or clear an image.

use std::sync::Arc;

use bytes::Bytes;
use image::ImageFormat;
use tracing::{debug, info, warn};
use uuid::Uuid;

use feedhub_core::config::storage::StorageConfig;
use feedhub_core::error::{AppError, FieldError};
use feedhub_core::result::AppResult;
use feedhub_core::traits::storage::StorageProvider;

use crate::providers::LocalStorageProvider;

/// Key prefix of every managed image.
pub const IMAGE_PREFIX: &str = "images/";

const MAX_NAME_LEN: usize = 100;

/// Validates, stores and clears post images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    provider: Arc<dyn StorageProvider>,
    allowed_mime_types: Vec<String>,
    max_bytes: u64,
}

impl ImageStore {
    /// Create an image store over an existing provider.
    pub fn new(provider: Arc<dyn StorageProvider>, config: &StorageConfig) -> Self {
        Self {
            provider,
            allowed_mime_types: config.allowed_mime_types.clone(),
            max_bytes: config.max_image_size_bytes,
        }
    }

    /// Create an image store on the local filesystem under `config.root_path`.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let provider = LocalStorageProvider::new(&config.root_path).await?;
        info!(root = %config.root_path, "Image storage initialized");
        Ok(Self::new(Arc::new(provider), config))
    }

    /// Validate and persist an image uploaded by `owner`, returning its key.
    pub async fn store(
        &self,
        owner: Uuid,
        original_name: &str,
        content_type: Option<&str>,
        data: Bytes,
    ) -> AppResult<String> {
        self.validate(content_type, &data)?;

        let key = format!(
            "{IMAGE_PREFIX}{owner}/{}-{}",
            Uuid::new_v4(),
            sanitize_file_name(original_name)
        );
        self.provider.write(&key, data).await?;
        info!(key = %key, owner = %owner, "Stored image");
        Ok(key)
    }

    /// Remove a stored image.
    ///
    /// Failures are logged and swallowed; a dangling image must not fail
    /// the post operation that replaced or deleted it.
    pub async fn clear(&self, key: &str) {
        if !is_managed_key(key) {
            debug!(key, "Skipping clear of unmanaged image key");
            return;
        }
        match self.provider.delete(key).await {
            Ok(()) => debug!(key, "Cleared image"),
            Err(e) => warn!(key, error = %e, "Failed to clear image"),
        }
    }

    /// Whether `key` names a stored image.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        if !is_managed_key(key) {
            return Ok(false);
        }
        self.provider.exists(key).await
    }

    /// Check the underlying provider.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.provider.health_check().await
    }

    fn validate(&self, content_type: Option<&str>, data: &Bytes) -> AppResult<()> {
        let mut errors = Vec::new();

        let declared_ok = content_type
            .map(|ct| self.allowed_mime_types.iter().any(|m| m.eq_ignore_ascii_case(ct)))
            .unwrap_or(false);
        let sniffed_ok = matches!(
            image::guess_format(data),
            Ok(ImageFormat::Png) | Ok(ImageFormat::Jpeg)
        );
        if !declared_ok || !sniffed_ok {
            errors.push(FieldError::new(
                "image",
                "Only png, jpg and jpeg images are allowed.",
            ));
        }

        if data.len() as u64 > self.max_bytes {
            errors.push(FieldError::new(
                "image",
                format!("Image exceeds the maximum size of {} bytes.", self.max_bytes),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::invalid_fields("Invalid image.", errors))
        }
    }
}

/// Whether `key` lies under the managed image prefix.
pub fn is_managed_key(key: &str) -> bool {
    key.starts_with(IMAGE_PREFIX) && key.len() > IMAGE_PREFIX.len()
}

/// The uploader encoded in a managed image key.
pub fn key_owner(key: &str) -> Option<Uuid> {
    let (owner, file) = key.strip_prefix(IMAGE_PREFIX)?.split_once('/')?;
    if file.is_empty() || file.contains('/') {
        return None;
    }
    Uuid::parse_str(owner).ok()
}

/// Reduce a client-supplied file name to a safe single path segment.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}
