//! State callback that feeds the dashboard server.
//!
//! After every mutation the ingest task applies, this callback
//! broadcasts a [`DashboardBroadcast`] to all connected `WebSocket`
//! clients and refreshes the REST snapshot.

use std::sync::Arc;

use serpiente_core::callback::{StateCallback, StateChange};
use serpiente_core::store::DashboardState;
use serpiente_observer::state::{AppState, DashboardBroadcast, DashboardSnapshot};
use tracing::debug;

/// Callback that bridges the ingest task to the dashboard server.
pub struct SnapshotCallback {
    state: Arc<AppState>,
}

impl SnapshotCallback {
    /// Create a new callback backed by the given app state.
    pub const fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }
}

impl StateCallback for SnapshotCallback {
    fn on_change(&mut self, state: &DashboardState, change: &StateChange) {
        let appended = match change {
            StateChange::EventAppended(event) => Some(event.clone()),
            StateChange::StatusReplaced(_) | StateChange::LinkChanged { .. } => None,
        };

        let message = DashboardBroadcast {
            status: state.current_status(),
            links: *state.links(),
            appended,
        };
        let receivers = self.state.broadcast(&message);
        debug!(receivers, "state change broadcast sent");

        // Refresh the REST snapshot. Use try_write so a busy read
        // never blocks ingestion; a skipped refresh is caught by the
        // next change.
        if let Ok(mut snapshot) = self.state.snapshot.try_write() {
            *snapshot = DashboardSnapshot::from_state(state);
        }
    }
}
