//! Core entity structs for the SCADA monitoring head.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ActionKind, OperativeState};
use crate::ids::ActionId;

/// Current operating state of the monitored machine.
///
/// Replaced wholesale on every status notification; no history is kept
/// and exactly one live instance exists per machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MachineStatus {
    /// Run/stop condition.
    pub operative_state: OperativeState,
    /// Whether the machine is deliberately taken offline for service.
    /// Distinct from a safety stop.
    pub maintenance_mode: bool,
}

/// A discrete safety-relevant occurrence recorded by the decision engine.
///
/// Created by the backend, never mutated, and discarded once evicted
/// past the dashboard's rolling window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SafetyEvent {
    /// Backend-assigned identifier, used only for display keying.
    #[ts(type = "number | string")]
    pub id: ActionId,
    /// What kind of action this event records.
    pub kind: ActionKind,
    /// Free-text description of why the action was taken.
    pub reason: String,
    /// When the backend recorded the action.
    pub occurred_at: DateTime<Utc>,
}
