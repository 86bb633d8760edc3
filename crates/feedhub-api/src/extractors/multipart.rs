//! Multipart form readers for post and image uploads.

use axum::extract::Multipart;
use axum::extract::multipart::{Field, MultipartError};
use axum::http::StatusCode;
use tracing::debug;

use feedhub_core::error::{AppError, FieldError};
use feedhub_service::{ImageUpload, PostInput};

/// Fields of the post create/edit form.
///
/// `image` is either a file part or, when editing without a new file, a
/// text part holding the current image key.
#[derive(Debug, Default)]
pub struct PostForm {
    /// `title` part.
    pub title: String,
    /// `content` part.
    pub content: String,
    /// Image key sent as text.
    pub image_path: Option<String>,
    /// Image sent as a file.
    pub image: Option<ImageUpload>,
}

impl PostForm {
    /// Read every part of `multipart`.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(form_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => form.title = field.text().await.map_err(form_error)?,
                "content" => form.content = field.text().await.map_err(form_error)?,
                "image" | "image_url" => match read_image(field).await? {
                    ImagePart::File(upload) => form.image = upload,
                    ImagePart::Path(path) => form.image_path = Some(path),
                },
                _ => debug!(field = %name, "Ignoring unknown form field"),
            }
        }
        Ok(form)
    }

    /// Split into the post input and the uploaded file.
    pub fn into_parts(self) -> (PostInput, Option<ImageUpload>) {
        (
            PostInput {
                title: self.title,
                content: self.content,
                image_url: self.image_path,
            },
            self.image,
        )
    }
}

/// Fields of the `PUT /post-image` form.
#[derive(Debug, Default)]
pub struct ImageForm {
    /// The new image.
    pub image: Option<ImageUpload>,
    /// Key of the image it replaces.
    pub old_path: Option<String>,
}

impl ImageForm {
    /// Read every part of `multipart`.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(form_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "image" => {
                    if let ImagePart::File(upload) = read_image(field).await? {
                        form.image = upload;
                    }
                }
                "old_path" | "oldPath" => {
                    form.old_path = Some(field.text().await.map_err(form_error)?)
                }
                _ => debug!(field = %name, "Ignoring unknown form field"),
            }
        }
        Ok(form)
    }
}

enum ImagePart {
    /// A file part; `None` when the client sent an empty file.
    File(Option<ImageUpload>),
    Path(String),
}

async fn read_image(field: Field<'_>) -> Result<ImagePart, AppError> {
    let Some(file_name) = field.file_name().map(str::to_string) else {
        return Ok(ImagePart::Path(field.text().await.map_err(form_error)?));
    };
    let content_type = field.content_type().map(str::to_string);
    let data = field.bytes().await.map_err(form_error)?;
    if data.is_empty() {
        return Ok(ImagePart::File(None));
    }
    Ok(ImagePart::File(Some(ImageUpload {
        file_name,
        content_type,
        data,
    })))
}

fn form_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::invalid_fields(
            "Invalid image.",
            vec![FieldError::new("image", "Image is too large.")],
        );
    }
    AppError::validation(format!("Invalid form data: {}", err.body_text()))
}
