//! The ingest task: single owner and sole writer of the dashboard state.
//!
//! Consumes [`Notification`] values from the feed channel, parses each
//! payload at the wire boundary, applies the resulting mutation, and
//! publishes every change through the [`StateCallback`] seam.
//!
//! Malformed payloads are dropped with a warning -- they never reach
//! the view. When the notification channel closes (every feed sender
//! gone), both channels are marked disconnected, the callback sees the
//! final health change, and the task exits returning the state.

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use serpiente_core::callback::{StateCallback, StateChange};
use serpiente_core::store::DashboardState;
use serpiente_types::{
    ActionRow, ChannelHealth, ChannelKind, MachineStatus, MachineStatusRow, SafetyEvent,
};

use crate::notification::Notification;

/// Owns the [`DashboardState`] and applies notifications to it.
pub struct IngestTask {
    state: DashboardState,
    callback: Box<dyn StateCallback>,
}

impl IngestTask {
    /// Create a task with a fresh state.
    pub fn new(callback: Box<dyn StateCallback>) -> Self {
        Self {
            state: DashboardState::new(),
            callback,
        }
    }

    /// Consume notifications until the channel closes, then return the
    /// final state.
    pub async fn run(mut self, mut rx: mpsc::Receiver<Notification>) -> DashboardState {
        while let Some(notification) = rx.recv().await {
            self.apply(notification);
        }

        // Every feed sender is gone: surface the disconnect so the
        // dashboard shows a stale indicator instead of silently
        // freezing.
        for channel in [ChannelKind::MachineStatus, ChannelKind::Actions] {
            if self.state.mark_disconnected(channel) {
                let change = StateChange::LinkChanged {
                    channel,
                    health: ChannelHealth::Disconnected,
                };
                self.callback.on_change(&self.state, &change);
            }
        }
        info!("notification channel closed, ingest task stopping");
        self.state
    }

    /// Parse and apply a single notification.
    fn apply(&mut self, notification: Notification) {
        let channel = notification.channel;
        match channel {
            ChannelKind::MachineStatus => {
                let row = match MachineStatusRow::from_value(notification.payload) {
                    Ok(row) => row,
                    Err(e) => {
                        warn!(channel = ?channel, error = %e, "dropping malformed notification");
                        return;
                    }
                };
                let status = MachineStatus::from(row);
                self.state.set_machine_status(status);
                debug!(
                    operative_state = status.operative_state.label(),
                    maintenance = status.maintenance_mode,
                    "machine status replaced"
                );
                self.mark_live(channel);
                self.callback
                    .on_change(&self.state, &StateChange::StatusReplaced(status));
            }
            ChannelKind::Actions => {
                let row = match ActionRow::from_value(notification.payload) {
                    Ok(row) => row,
                    Err(e) => {
                        warn!(channel = ?channel, error = %e, "dropping malformed notification");
                        return;
                    }
                };
                let event = SafetyEvent::from(row);
                debug!(id = %event.id, kind = event.kind.label(), "safety event appended");
                self.state.append_event(event.clone());
                self.mark_live(channel);
                self.callback
                    .on_change(&self.state, &StateChange::EventAppended(event));
            }
        }
    }

    /// Stamp a well-formed delivery; publish the health transition the
    /// first time the channel goes live.
    fn mark_live(&mut self, channel: ChannelKind) {
        if self.state.mark_delivery(channel, Utc::now()) {
            let change = StateChange::LinkChanged {
                channel,
                health: ChannelHealth::Live,
            };
            self.callback.on_change(&self.state, &change);
        }
    }
}

/// Spawn the ingest task on the Tokio runtime.
///
/// The returned handle resolves to the final dashboard state once the
/// notification channel closes.
pub fn spawn_ingest(
    callback: Box<dyn StateCallback>,
    rx: mpsc::Receiver<Notification>,
) -> JoinHandle<DashboardState> {
    tokio::spawn(IngestTask::new(callback).run(rx))
}
