//! Feed handlers: post listing and CRUD.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;

use feedhub_core::types::PageResponse;
use feedhub_service::PostView;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PostForm, PostsQuery, parse_post_id};
use crate::state::AppState;

/// GET /feed/posts?page=N
pub async fn list_posts(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<PostsQuery>,
) -> Result<Json<ApiResponse<PageResponse<PostView>>>, ApiError> {
    let page = state.feed_service.list_posts(query.page()).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// POST /feed/post
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<PostView>>), ApiError> {
    let (input, upload) = PostForm::read(multipart).await?.into_parts();
    let post = state.feed_service.create_post(&auth, input, upload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(post))))
}

/// GET /feed/post/{id}
pub async fn get_post(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PostView>>, ApiError> {
    let post = state.feed_service.get_post(parse_post_id(&id)?).await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// PUT /feed/post/{id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<PostView>>, ApiError> {
    let post_id = parse_post_id(&id)?;
    let (input, upload) = PostForm::read(multipart).await?.into_parts();
    let post = state
        .feed_service
        .update_post(&auth, post_id, input, upload)
        .await?;
    Ok(Json(ApiResponse::ok(post)))
}

/// DELETE /feed/post/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .feed_service
        .delete_post(&auth, parse_post_id(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Deleted post."))))
}
