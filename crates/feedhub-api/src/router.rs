//! Route definitions for the FeedHub HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Multipart framing allowance on top of the image size limit.
const FORM_OVERHEAD_BYTES: u64 = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = usize::try_from(
        state
            .config
            .storage
            .max_image_size_bytes
            .saturating_add(FORM_OVERHEAD_BYTES),
    )
    .unwrap_or(usize::MAX);

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);
    let timeout = timeout_layer(state.config.server.request_timeout_seconds);

    Router::new()
        .merge(feed_routes())
        .merge(auth_routes())
        .merge(image_routes())
        .merge(graphql_routes())
        .merge(health_routes())
        .route("/ws", get(handlers::ws::ws_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(timeout)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Requests running longer than `seconds` are answered with 408.
fn timeout_layer(seconds: u64) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, Duration::from_secs(seconds))
}

/// Post listing and CRUD
fn feed_routes() -> Router<AppState> {
    Router::new()
        .route("/feed/posts", get(handlers::feed::list_posts))
        .route("/feed/post", post(handlers::feed::create_post))
        .route(
            "/feed/post/{id}",
            get(handlers::feed::get_post)
                .put(handlers::feed::update_post)
                .delete(handlers::feed::delete_post),
        )
}

/// Signup, login and status
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", put(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route(
            "/auth/status",
            get(handlers::user::get_status).patch(handlers::user::update_status),
        )
}

/// Image upload ahead of a GraphQL post mutation
fn image_routes() -> Router<AppState> {
    Router::new().route("/post-image", put(handlers::image::upload_image))
}

fn graphql_routes() -> Router<AppState> {
    Router::new().route(
        "/graphql",
        get(handlers::graphql::graphiql).post(handlers::graphql::graphql),
    )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
