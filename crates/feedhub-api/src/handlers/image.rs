//! Image upload handler.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;

use crate::dto::response::{ApiResponse, ImageUploadResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ImageForm};
use crate::state::AppState;

/// PUT /post-image
///
/// Stores the `image` part and clears `old_path`. A request without a
/// file is answered with 200 and no path.
pub async fn upload_image(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ImageUploadResponse>>), ApiError> {
    let form = ImageForm::read(multipart).await?;
    let stored = state
        .image_service
        .upload(&auth, form.image, form.old_path.as_deref())
        .await?;

    let response = match stored {
        Some(file_path) => (
            StatusCode::CREATED,
            ImageUploadResponse {
                message: "File stored.".to_string(),
                file_path: Some(file_path),
            },
        ),
        None => (
            StatusCode::OK,
            ImageUploadResponse {
                message: "No file provided!".to_string(),
                file_path: None,
            },
        ),
    };
    Ok((response.0, Json(ApiResponse::ok(response.1))))
}
