//! Integration tests for the dashboard API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use serpiente_observer::router::build_router;
use serpiente_observer::state::{AppState, DashboardSnapshot};
use serpiente_types::{
    ActionId, ActionKind, ChannelHealth, MachineStatus, OperativeState, SafetyEvent,
};
use tower::ServiceExt;

fn event(id: i64, kind: ActionKind, reason: &str) -> SafetyEvent {
    SafetyEvent {
        id: ActionId(id),
        kind,
        reason: String::from(reason),
        occurred_at: Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap(),
    }
}

async fn make_test_state() -> Arc<AppState> {
    let state = Arc::new(AppState::new());

    {
        let mut snap = state.snapshot.write().await;
        *snap = DashboardSnapshot {
            status: MachineStatus {
                operative_state: OperativeState::Stop,
                maintenance_mode: true,
            },
            events: vec![
                event(3, ActionKind::TotalStop, "Intrusión crítica"),
                event(2, ActionKind::Warning, "Proximidad al borde"),
                event(1, ActionKind::Log, "Acceso técnico autorizado"),
            ],
            links: serpiente_core::ChannelLinks::default(),
            updated_at: Some(Utc::now()),
        };
        snap.links.mark_delivery(serpiente_types::ChannelKind::Actions, Utc::now());
    }

    state
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let state = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));
}

#[tokio::test]
async fn test_get_status() {
    let state = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"]["operative_state"], "STOP");
    assert_eq!(json["status"]["maintenance_mode"], true);
    assert_eq!(json["links"]["actions"]["health"], "live");
    assert_eq!(json["links"]["machine_status"]["health"], "connecting");
}

#[tokio::test]
async fn test_list_events_newest_first() {
    let state = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/events").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 3);
    assert_eq!(json["events"][0]["id"], 3);
    assert_eq!(json["events"][0]["kind"], "PARADA_TOTAL");
    assert_eq!(json["events"][2]["id"], 1);
}

#[tokio::test]
async fn test_list_events_kind_filter() {
    let state = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/events?kind=ADVERTENCIA")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["events"][0]["reason"], "Proximidad al borde");
}

#[tokio::test]
async fn test_list_events_unknown_kind_is_bad_request() {
    let state = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(
            Request::get("/api/events?kind=REINICIO")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("REINICIO"));
}

#[tokio::test]
async fn test_get_live_combined_payload() {
    let state = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/live").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["machine"]["operative_state"], "STOP");
    assert_eq!(json["events"].as_array().unwrap().len(), 3);
    assert!(json["updated_at"].is_string());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let state = make_test_state().await;
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/telemetry").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_broadcast_reaches_subscribers() {
    let state = make_test_state().await;
    let mut rx = state.subscribe();

    let message = serpiente_observer::DashboardBroadcast {
        status: MachineStatus::default(),
        links: serpiente_core::ChannelLinks::default(),
        appended: Some(event(9, ActionKind::Log, "prueba")),
    };
    let receivers = state.broadcast(&message);
    assert_eq!(receivers, 1);

    let received = rx.recv().await.unwrap();
    assert_eq!(received.appended.map(|e| e.id), Some(ActionId(9)));
    assert_eq!(received.status.operative_state, OperativeState::Run);
}

#[tokio::test]
async fn test_snapshot_from_state_copies_everything() {
    let mut dashboard = serpiente_core::DashboardState::new();
    dashboard.set_machine_status(MachineStatus {
        operative_state: OperativeState::Stop,
        maintenance_mode: false,
    });
    dashboard.append_event(event(1, ActionKind::Warning, "prueba"));

    let snapshot = DashboardSnapshot::from_state(&dashboard);
    assert_eq!(snapshot.status, dashboard.current_status());
    assert_eq!(snapshot.events.len(), 1);
    assert!(snapshot.updated_at.is_some());
}

#[tokio::test]
async fn test_zero_receivers_is_not_an_error() {
    let state = Arc::new(AppState::new());
    // ChannelHealth appears in the broadcast links; exercise default.
    let message = serpiente_observer::DashboardBroadcast {
        status: MachineStatus::default(),
        links: serpiente_core::ChannelLinks::default(),
        appended: None,
    };
    assert_eq!(state.broadcast(&message), 0);
    assert_eq!(
        message.links.machine_status.health,
        ChannelHealth::Connecting
    );
}
