//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database_healthy = state.stores.health_check().await.unwrap_or(false);
    let storage_healthy = state.images.health_check().await.unwrap_or(false);
    let status = if database_healthy && storage_healthy {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: state.stores.backend().to_string(),
        database_healthy,
        storage_healthy,
        ws_connections: state.realtime.connections.connection_count(),
        ws_users: state.realtime.connections.user_count(),
    }))
}
