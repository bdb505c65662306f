//! State-change callback seam between ingestion and rendering.
//!
//! The ingest task owns the [`DashboardState`] and invokes a
//! [`StateCallback`] after every mutation. The HMI binary installs a
//! callback that copies the state into the observer's shared snapshot
//! and broadcasts the change to connected `WebSocket` clients; tests
//! install a recording callback instead.

use serpiente_types::{ChannelHealth, ChannelKind, MachineStatus, SafetyEvent};

use crate::store::DashboardState;

/// A single mutation applied to the dashboard state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// The machine status was replaced wholesale.
    StatusReplaced(MachineStatus),
    /// A safety event was prepended to the rolling log.
    EventAppended(SafetyEvent),
    /// A channel's health changed.
    LinkChanged {
        /// Which channel changed.
        channel: ChannelKind,
        /// The channel's new health.
        health: ChannelHealth,
    },
}

/// Receives every dashboard state mutation, in application order.
///
/// Callbacks run on the ingest task; they must not block. A slow
/// callback delays ingestion of the next notification.
pub trait StateCallback: Send {
    /// Called after `change` has been applied to `state`.
    fn on_change(&mut self, state: &DashboardState, change: &StateChange);
}

/// A callback that ignores every change. Useful when no rendering
/// layer is attached (headless tests, tooling).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCallback;

impl StateCallback for NoopCallback {
    fn on_change(&mut self, _state: &DashboardState, _change: &StateChange) {}
}
