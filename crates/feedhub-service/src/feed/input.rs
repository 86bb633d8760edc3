//! Post create/edit form.

use serde::{Deserialize, Serialize};
use validator::Validate;

use feedhub_core::error::{FieldError, field_errors_from};

/// Title and content of a post, plus an already stored image key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PostInput {
    /// Title, at least 5 characters after trimming.
    #[validate(length(min = 5, message = "Title must be at least 5 characters long."))]
    pub title: String,
    /// Body, at least 5 characters after trimming.
    #[validate(length(min = 5, message = "Content must be at least 5 characters long."))]
    pub content: String,
    /// Key of a previously uploaded image.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl PostInput {
    /// Trim all fields; an empty image key counts as absent.
    pub(crate) fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            image_url: self
                .image_url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
        }
    }

    pub(crate) fn field_errors(&self) -> Vec<FieldError> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => field_errors_from(&e),
        }
    }
}
