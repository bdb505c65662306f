//! REST API endpoint handlers for the dashboard server.
//!
//! All handlers read from the in-memory [`DashboardSnapshot`] via the
//! shared [`AppState`]; nothing here touches the backend directly.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/status` | Machine status + channel health |
//! | `GET` | `/api/events` | Recent events (optional `?kind=` filter) |
//! | `GET` | `/api/live` | Combined polling fallback payload |
//!
//! `/api/live` mirrors the emergency polling route of the original
//! backend: a single request that returns everything the dashboard
//! needs when realtime delivery is unavailable.
//!
//! [`DashboardSnapshot`]: crate::state::DashboardSnapshot

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use serpiente_types::{ActionKind, ChannelHealth, OperativeState};

use crate::error::ObserverError;
use crate::state::AppState;

/// Query parameters for the `GET /api/events` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct EventsQuery {
    /// Filter events by kind (`PARADA_TOTAL`, `ADVERTENCIA`, `LOG`).
    pub kind: Option<String>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing the machine state and API links.
///
/// This is the fallback panel until the React frontend is wired up; it
/// reuses the dashboard's dark SCADA palette.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.snapshot.read().await;
    let operative = snapshot.status.operative_state.label();
    let mode = if snapshot.status.maintenance_mode {
        "MODO MANTENIMIENTO"
    } else {
        "PRODUCCIÓN NORMAL"
    };
    let state_class = match snapshot.status.operative_state {
        OperativeState::Run => "run",
        OperativeState::Stop => "stop",
    };
    let event_count = snapshot.events.len();
    let status_link = health_label(snapshot.links.machine_status.health);
    let actions_link = health_label(snapshot.links.actions.health);

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="utf-8">
    <title>S.E.R.P.I.E.N.T.E. SCADA</title>
    <style>
        body {{
            background: #0f172a;
            color: #e2e8f0;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #22d3ee; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #94a3b8; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #1e293b;
            border: 1px solid #334155;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #94a3b8; font-size: 0.85rem; }}
        .metric .value {{ color: #22d3ee; font-size: 1.5rem; font-weight: bold; }}
        .metric .value.run {{ color: #4ade80; }}
        .metric .value.stop {{ color: #f87171; }}
        a {{ color: #22d3ee; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "GET "; color: #4ade80; font-weight: bold; }}
        hr {{ border: none; border-top: 1px solid #334155; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>S.E.R.P.I.E.N.T.E. SCADA</h1>
    <p class="subtitle">Industrial Safety Monitoring System</p>

    <div>
        <div class="metric">
            <div class="label">Estado Máquina</div>
            <div class="value {state_class}">{operative}</div>
        </div>
        <div class="metric">
            <div class="label">Modo</div>
            <div class="value">{mode}</div>
        </div>
        <div class="metric">
            <div class="label">Eventos</div>
            <div class="value">{event_count}</div>
        </div>
        <div class="metric">
            <div class="label">Canal estado</div>
            <div class="value">{status_link}</div>
        </div>
        <div class="metric">
            <div class="label">Canal acciones</div>
            <div class="value">{actions_link}</div>
        </div>
    </div>

    <hr>

    <h2>API</h2>
    <ul>
        <li><a href="/api/status">/api/status</a> -- Machine status + channel health</li>
        <li><a href="/api/events">/api/events</a> -- Recent events (?kind=PARADA_TOTAL)</li>
        <li><a href="/api/live">/api/live</a> -- Polling fallback payload</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li style="list-style:none;"><code>ws://host:port/ws/dashboard</code> -- Live state stream</li>
    </ul>
</body>
</html>"#
    ))
}

/// Short uppercase label for a channel health value.
const fn health_label(health: ChannelHealth) -> &'static str {
    match health {
        ChannelHealth::Connecting => "CONECTANDO",
        ChannelHealth::Live => "EN VIVO",
        ChannelHealth::Disconnected => "DESCONECTADO",
    }
}

// ---------------------------------------------------------------------------
// GET /api/status -- machine status + channel health
// ---------------------------------------------------------------------------

/// Return the current machine status and the health of both
/// notification channels.
pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.snapshot.read().await;
    Json(serde_json::json!({
        "status": snapshot.status,
        "links": snapshot.links,
        "updated_at": snapshot.updated_at,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/events -- recent events
// ---------------------------------------------------------------------------

/// Return the rolling event log, newest first, optionally filtered by
/// action kind.
///
/// # Query Parameters
///
/// - `kind`: `PARADA_TOTAL` | `ADVERTENCIA` | `LOG`
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventsQuery>,
) -> Result<impl IntoResponse, ObserverError> {
    let kind = match query.kind {
        Some(label) => Some(parse_kind(&label)?),
        None => None,
    };

    let snapshot = state.snapshot.read().await;
    let events: Vec<_> = snapshot
        .events
        .iter()
        .filter(|event| kind.is_none_or(|k| event.kind == k))
        .cloned()
        .collect();

    Ok(Json(serde_json::json!({
        "count": events.len(),
        "events": events,
    })))
}

/// Parse an action-kind wire label from a query parameter.
fn parse_kind(label: &str) -> Result<ActionKind, ObserverError> {
    serde_json::from_value(serde_json::Value::String(label.to_owned()))
        .map_err(|_| ObserverError::InvalidQuery(format!("unknown action kind: {label}")))
}

// ---------------------------------------------------------------------------
// GET /api/live -- polling fallback
// ---------------------------------------------------------------------------

/// Combined payload for clients polling instead of using the
/// `WebSocket` stream.
pub async fn get_live(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.snapshot.read().await;
    Json(serde_json::json!({
        "success": true,
        "machine": snapshot.status,
        "events": snapshot.events,
        "links": snapshot.links,
        "updated_at": snapshot.updated_at,
    }))
}
