//! Axum router construction for the dashboard API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled so the React dashboard can call the
//! API cross-origin during development.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the dashboard server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws/dashboard` -- `WebSocket` state stream
/// - `GET /api/status` -- machine status + channel health
/// - `GET /api/events` -- recent events
/// - `GET /api/live` -- combined polling fallback
///
/// CORS allows any origin for development. In production this should
/// be restricted to the dashboard host.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws/dashboard", get(ws::ws_dashboard))
        // REST API
        .route("/api/status", get(handlers::get_status))
        .route("/api/events", get(handlers::list_events))
        .route("/api/live", get(handlers::get_live))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
