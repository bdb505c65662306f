//! The dashboard state store.
//!
//! [`DashboardState`] is an explicitly owned object: the ingest task
//! constructs it at startup, is its only writer, and drops it on
//! shutdown. The rendering layer never touches it directly -- it sees
//! copies published through the [`StateCallback`](crate::callback)
//! seam.
//!
//! The store trusts its input. Validation happens at the wire boundary
//! (`serpiente_types::wire`); by the time a value reaches these methods
//! it is a well-formed domain type, and none of the operations here has
//! an error path.

use chrono::{DateTime, Utc};
use serpiente_types::{ChannelKind, MachineStatus, SafetyEvent};

use crate::health::ChannelLinks;

/// Maximum number of safety events kept in the rolling log.
pub const EVENT_LOG_CAP: usize = 5;

/// In-memory view state of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    status: MachineStatus,
    /// Newest first, never longer than [`EVENT_LOG_CAP`].
    events: Vec<SafetyEvent>,
    links: ChannelLinks,
}

impl DashboardState {
    /// Create a fresh store: machine assumed in normal production, no
    /// events, both channels still connecting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current machine status. Last write wins, no merging.
    pub const fn current_status(&self) -> MachineStatus {
        self.status
    }

    /// The rolling event log: length <= [`EVENT_LOG_CAP`], newest first.
    pub fn recent_events(&self) -> &[SafetyEvent] {
        &self.events
    }

    /// Link state of both notification channels.
    pub const fn links(&self) -> &ChannelLinks {
        &self.links
    }

    /// Replace the machine status unconditionally.
    pub const fn set_machine_status(&mut self, status: MachineStatus) {
        self.status = status;
    }

    /// Prepend an event to the log, then truncate to the cap.
    ///
    /// Events are trusted to arrive in creation order; the store does
    /// not resequence by timestamp. Out-of-order delivery misorders the
    /// display -- a documented limitation of the adapter contract.
    pub fn append_event(&mut self, event: SafetyEvent) {
        self.events.insert(0, event);
        self.events.truncate(EVENT_LOG_CAP);
    }

    /// Record a delivery on a channel. Returns `true` if the channel's
    /// health changed.
    pub fn mark_delivery(&mut self, channel: ChannelKind, at: DateTime<Utc>) -> bool {
        self.links.mark_delivery(channel, at)
    }

    /// Record that a channel's subscription terminated. Returns `true`
    /// if the channel's health changed.
    pub fn mark_disconnected(&mut self, channel: ChannelKind) -> bool {
        self.links.mark_disconnected(channel)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use serpiente_types::{ActionId, ActionKind, OperativeState};

    use super::*;

    fn event(id: i64) -> SafetyEvent {
        SafetyEvent {
            id: ActionId(id),
            kind: ActionKind::Log,
            reason: format!("evento {id}"),
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn log_never_exceeds_cap_and_stays_newest_first() {
        let mut state = DashboardState::new();
        for id in 1..=20 {
            state.append_event(event(id));
            assert!(state.recent_events().len() <= EVENT_LOG_CAP);
            assert_eq!(state.recent_events().first().map(|e| e.id), Some(ActionId(id)));
        }
    }

    #[test]
    fn six_appends_evict_the_first() {
        let mut state = DashboardState::new();
        for id in 1..=6 {
            state.append_event(event(id));
        }
        let ids: Vec<i64> = state.recent_events().iter().map(|e| e.id.into_inner()).collect();
        assert_eq!(ids, vec![6, 5, 4, 3, 2]);
    }

    #[test]
    fn status_is_last_write_wins() {
        let mut state = DashboardState::new();

        let stopped = MachineStatus {
            operative_state: OperativeState::Stop,
            maintenance_mode: true,
        };
        state.set_machine_status(stopped);
        assert_eq!(state.current_status(), stopped);

        let running = MachineStatus::default();
        state.set_machine_status(running);
        assert_eq!(state.current_status(), running);
    }

    #[test]
    fn identical_status_writes_are_idempotent() {
        let mut state = DashboardState::new();
        let status = MachineStatus {
            operative_state: OperativeState::Stop,
            maintenance_mode: false,
        };

        state.set_machine_status(status);
        let first = state.current_status();
        state.set_machine_status(status);
        assert_eq!(state.current_status(), first);
    }

    #[test]
    fn fresh_store_assumes_normal_production() {
        let state = DashboardState::new();
        assert_eq!(state.current_status().operative_state, OperativeState::Run);
        assert!(!state.current_status().maintenance_mode);
        assert!(state.recent_events().is_empty());
    }

    #[test]
    fn appends_do_not_touch_status() {
        let mut state = DashboardState::new();
        let before = state.current_status();
        state.append_event(event(1));
        assert_eq!(state.current_status(), before);
    }
}
