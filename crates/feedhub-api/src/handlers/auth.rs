//! Auth handlers: signup and login.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{LoginRequest, SignupRequest};
use crate::dto::response::{ApiResponse, LoginResponse, SignupResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// PUT /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SignupResponse>>), ApiError> {
    let user = state.auth_service.signup(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(SignupResponse {
            message: "User created!".to_string(),
            user_id: user.id,
        })),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let result = state.auth_service.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        token: result.token,
        user_id: result.user_id,
        expires_at: result.expires_at,
    })))
}
