//! Enumeration types for the SCADA monitoring head.
//!
//! Wire forms match the backend tables exactly: `estado_maquina` stores
//! the operating state as `"RUN"` / `"STOP"`, and `acciones_sistema`
//! stores the action kind under its original Spanish labels.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Current run/stop condition of the monitored machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperativeState {
    /// The machine is in normal production.
    #[default]
    Run,
    /// The machine is stopped (safety stop or operator stop).
    Stop,
}

impl OperativeState {
    /// Wire label as stored in the `estado_maquina` table.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Run => "RUN",
            Self::Stop => "STOP",
        }
    }
}

/// Kind of a safety action recorded by the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ActionKind {
    /// Emergency interlock: the machine was brought to a total stop.
    #[serde(rename = "PARADA_TOTAL")]
    TotalStop,
    /// Audible/visual warning issued to the operator.
    #[serde(rename = "ADVERTENCIA")]
    Warning,
    /// Informational audit entry with no physical effect.
    #[serde(rename = "LOG")]
    Log,
}

impl ActionKind {
    /// Wire label as stored in the `acciones_sistema` table.
    pub const fn label(self) -> &'static str {
        match self {
            Self::TotalStop => "PARADA_TOTAL",
            Self::Warning => "ADVERTENCIA",
            Self::Log => "LOG",
        }
    }
}

/// One of the two independent notification channels the dashboard
/// subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Row updates on the `estado_maquina` record.
    MachineStatus,
    /// Row insertions on the `acciones_sistema` table.
    Actions,
}

impl ChannelKind {
    /// Backend channel name (also the Postgres `NOTIFY` channel).
    pub const fn channel_name(self) -> &'static str {
        match self {
            Self::MachineStatus => "estado_maquina",
            Self::Actions => "acciones_sistema",
        }
    }
}

/// Health of a notification channel as seen by the dashboard.
///
/// The original dashboard had no disconnect indication at all: a silent
/// channel was indistinguishable from a healthy idle one. Tracking
/// health explicitly lets the frontend render a visible stale indicator
/// instead of silently going dark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum ChannelHealth {
    /// Subscribed, but no delivery has arrived yet.
    #[default]
    Connecting,
    /// At least one notification has been delivered.
    Live,
    /// The underlying subscription terminated; no further deliveries
    /// will arrive until the dashboard is restarted.
    Disconnected,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn operative_state_wire_form() {
        assert_eq!(serde_json::to_string(&OperativeState::Run).unwrap(), "\"RUN\"");
        let parsed: OperativeState = serde_json::from_str("\"STOP\"").unwrap();
        assert_eq!(parsed, OperativeState::Stop);
    }

    #[test]
    fn action_kind_wire_form() {
        assert_eq!(
            serde_json::to_string(&ActionKind::TotalStop).unwrap(),
            "\"PARADA_TOTAL\""
        );
        let parsed: ActionKind = serde_json::from_str("\"ADVERTENCIA\"").unwrap();
        assert_eq!(parsed, ActionKind::Warning);
    }

    #[test]
    fn unknown_action_kind_is_rejected() {
        let parsed: Result<ActionKind, _> = serde_json::from_str("\"REINICIO\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn channel_names_match_backend_tables() {
        assert_eq!(ChannelKind::MachineStatus.channel_name(), "estado_maquina");
        assert_eq!(ChannelKind::Actions.channel_name(), "acciones_sistema");
    }

    #[test]
    fn default_state_is_run() {
        assert_eq!(OperativeState::default(), OperativeState::Run);
    }
}
