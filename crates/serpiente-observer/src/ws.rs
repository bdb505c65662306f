//! `WebSocket` handler for real-time dashboard streaming.
//!
//! Clients connect to `GET /ws/dashboard`, receive the current
//! snapshot as their first frame, and from then on a JSON-encoded
//! [`DashboardBroadcast`] message for every state change the ingest
//! task applies.
//!
//! If a client falls behind, lagged messages are silently skipped and
//! the client resumes from the most recent change -- the dashboard
//! only ever renders current state, so skipped intermediate frames
//! are harmless.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::{debug, warn};

use crate::state::{AppState, DashboardBroadcast};

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming dashboard state.
///
/// # Route
///
/// `GET /ws/dashboard`
pub async fn ws_dashboard(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Handle the `WebSocket` lifecycle: send the initial snapshot, then
/// forward each broadcast as a text frame.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("dashboard client connected");

    // Subscribe before reading the snapshot so no change between the
    // two is lost.
    let mut rx = state.subscribe();

    // First frame: the full current snapshot, so the client renders
    // immediately instead of waiting for the next change.
    let initial = {
        let snapshot = state.snapshot.read().await;
        serde_json::to_string(&*snapshot)
    };
    match initial {
        Ok(json) => {
            if socket.send(Message::Text(json.into())).await.is_err() {
                debug!("dashboard client disconnected before first frame");
                return;
            }
        }
        Err(e) => {
            warn!("failed to serialize initial snapshot: {e}");
            return;
        }
    }

    loop {
        tokio::select! {
            // A state change from the ingest task.
            result = rx.recv() => {
                match result {
                    Ok(change) => {
                        if !send_change(&mut socket, &change).await {
                            return;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!(skipped = n, "dashboard client lagged, skipping ahead");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("broadcast channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            // Client frames: close, ping, or noise.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("dashboard client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("dashboard client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    _ => {
                        // Ignore text/binary frames from the client.
                    }
                }
            }
        }
    }
}

/// Serialize and send one broadcast frame. Returns `false` when the
/// client is gone.
async fn send_change(socket: &mut WebSocket, change: &DashboardBroadcast) -> bool {
    let json = match serde_json::to_string(change) {
        Ok(json) => json,
        Err(e) => {
            warn!("failed to serialize dashboard broadcast: {e}");
            return true;
        }
    };
    if socket.send(Message::Text(json.into())).await.is_err() {
        debug!("dashboard client disconnected (send failed)");
        return false;
    }
    true
}
