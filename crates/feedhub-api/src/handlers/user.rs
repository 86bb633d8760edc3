//! User status handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::request::UpdateStatusRequest;
use crate::dto::response::{ApiResponse, StatusResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /auth/status
pub async fn get_status(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<StatusResponse>>, ApiError> {
    let status = state.user_service.get_status(&auth).await?;
    Ok(Json(ApiResponse::ok(StatusResponse { status })))
}

/// PATCH /auth/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<StatusResponse>>, ApiError> {
    let user = state.user_service.update_status(&auth, &req.status).await?;
    Ok(Json(ApiResponse::ok(StatusResponse {
        status: user.status,
    })))
}
