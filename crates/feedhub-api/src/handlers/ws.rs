//! WebSocket upgrade handler.

use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use feedhub_core::error::AppError;
use feedhub_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameter for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// JWT access token.
    pub token: Option<String>,
}

/// GET /ws?token={jwt}
///
/// The token is checked before the upgrade itself.
pub async fn ws_handler(
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Result<Response, ApiError> {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::authentication("Not authenticated."))?;
    let ctx = RequestContext::from(state.jwt_decoder.decode(&token)?);

    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return Ok(rejection.into_response()),
    };
    Ok(ws.on_upgrade(move |socket| handle_ws_connection(state, ctx, socket)))
}

/// Pumps frames between the socket and the connection manager until
/// either side closes or the engine shuts down.
async fn handle_ws_connection(state: AppState, ctx: RequestContext, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let connections = &state.realtime.connections;

    let (handle, mut outbound_rx) = connections.register(ctx.user_id, ctx.email.clone());
    let conn_id = handle.id;
    drop(handle);

    let mut shutdown = state.realtime.shutdown_receiver();

    loop {
        tokio::select! {
            outbound = outbound_rx.recv() => {
                let Some(frame) = outbound else {
                    debug!(conn_id = %conn_id, "Connection evicted");
                    break;
                };
                if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                    break;
                }
            }
            inbound = ws_rx.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        connections.handle_inbound(&conn_id, text.as_str());
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                        break;
                    }
                }
            }
            _ = shutdown.recv() => break,
        }
    }

    let _ = ws_tx.send(Message::Close(None)).await;
    connections.unregister(&conn_id);

    info!(
        conn_id = %conn_id,
        user_id = %ctx.user_id,
        "WebSocket connection closed"
    );
}
