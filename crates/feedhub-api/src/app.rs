//! Application builder: wires router, middleware and state into an Axum app.

use axum::Router;
use tracing::{error, info};

use feedhub_core::config::AppConfig;
use feedhub_core::error::{AppError, ErrorKind};
use feedhub_core::result::AppResult;
use feedhub_database::Stores;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the FeedHub server until Ctrl+C.
pub async fn run_server(config: AppConfig, stores: Stores) -> AppResult<()> {
    info!("Starting FeedHub server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::build(config, stores).await?;
    let realtime = state.realtime.clone();
    let pool = state.stores.pool.clone();

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e))?;

    info!("FeedHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            realtime.shutdown();
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    info!("FeedHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler; running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
