//! Shared application state for the dashboard API server.
//!
//! [`AppState`] holds the broadcast channel for state-change messages
//! and a read-only snapshot of the dashboard state. The ingest side
//! updates the snapshot through its state callback; the REST and
//! `WebSocket` handlers only ever read it, so serving clients never
//! blocks ingestion.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serpiente_core::health::ChannelLinks;
use serpiente_core::store::DashboardState;
use serpiente_types::{MachineStatus, SafetyEvent};
use tokio::sync::{RwLock, broadcast};

/// Capacity of the broadcast channel for state-change messages.
///
/// If a subscriber falls behind by more than this many messages it
/// will receive a [`broadcast::error::RecvError::Lagged`] and skip to
/// the newest message.
const BROADCAST_CAPACITY: usize = 256;

/// JSON-serializable state change pushed over the `WebSocket`.
///
/// Carries enough for a connected dashboard to redraw without a REST
/// round-trip: the full (small) view state plus the event that was
/// appended, if the change was an append.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DashboardBroadcast {
    /// Machine status after the change.
    pub status: MachineStatus,
    /// Link health of both channels after the change.
    pub links: ChannelLinks,
    /// The event that was appended, when the change was an append.
    pub appended: Option<SafetyEvent>,
}

/// Read-only copy of the dashboard state served by the REST endpoints.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct DashboardSnapshot {
    /// Current machine status.
    pub status: MachineStatus,
    /// Rolling event log, newest first, length <= 5.
    pub events: Vec<SafetyEvent>,
    /// Link health of both notification channels.
    pub links: ChannelLinks,
    /// When the snapshot was last refreshed, if ever.
    pub updated_at: Option<DateTime<Utc>>,
}

impl DashboardSnapshot {
    /// Copy the ingest-owned state into a snapshot.
    pub fn from_state(state: &DashboardState) -> Self {
        Self {
            status: state.current_status(),
            events: state.recent_events().to_vec(),
            links: *state.links(),
            updated_at: Some(Utc::now()),
        }
    }
}

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Broadcast sender for state-change messages.
    pub tx: broadcast::Sender<DashboardBroadcast>,
    /// The current dashboard snapshot, refreshed on every state change.
    pub snapshot: Arc<RwLock<DashboardSnapshot>>,
}

impl AppState {
    /// Create a new application state with an empty snapshot.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            snapshot: Arc::new(RwLock::new(DashboardSnapshot::default())),
        }
    }

    /// Subscribe to the state-change broadcast channel.
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardBroadcast> {
        self.tx.subscribe()
    }

    /// Publish a state change to all connected clients.
    ///
    /// Returns the number of receivers that got the message. Zero is
    /// normal when no `WebSocket` client is connected.
    pub fn broadcast(&self, message: &DashboardBroadcast) -> usize {
        self.tx.send(message.clone()).unwrap_or(0)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
