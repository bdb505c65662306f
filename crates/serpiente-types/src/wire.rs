//! Row images exactly as the backend tables deliver them.
//!
//! The realtime backend pushes the new row image of a changed record as
//! a JSON object with the original Spanish column names. These structs
//! are the typed boundary: a payload either parses into a row here or
//! is rejected as [`MalformedRow`] and never reaches the view state.
//!
//! Unknown columns are ignored -- the `acciones_sistema` table carries
//! extra columns (e.g. the computed risk) the dashboard does not render.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{ActionKind, OperativeState};
use crate::ids::ActionId;
use crate::structs::{MachineStatus, SafetyEvent};

/// A notification payload could not be parsed into a known row shape.
///
/// Recommended handling is to drop the notification and log a warning;
/// a malformed row must never propagate undefined state into the view.
#[derive(Debug, thiserror::Error)]
pub enum MalformedRow {
    /// The payload is not a valid `estado_maquina` row image.
    #[error("malformed machine status row: {source}")]
    Status {
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The payload is not a valid `acciones_sistema` row image.
    #[error("malformed action row: {source}")]
    Action {
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// New row image of the `estado_maquina` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineStatusRow {
    /// Run/stop condition (`RUN` / `STOP`).
    #[serde(rename = "estado_operativo")]
    pub operative_state: OperativeState,
    /// Maintenance flag.
    #[serde(rename = "modo_mantenimiento")]
    pub maintenance_mode: bool,
}

impl MachineStatusRow {
    /// Parse a raw notification payload into a status row.
    pub fn from_value(payload: serde_json::Value) -> Result<Self, MalformedRow> {
        serde_json::from_value(payload).map_err(|source| MalformedRow::Status { source })
    }
}

impl From<MachineStatusRow> for MachineStatus {
    fn from(row: MachineStatusRow) -> Self {
        Self {
            operative_state: row.operative_state,
            maintenance_mode: row.maintenance_mode,
        }
    }
}

/// New row image of an inserted `acciones_sistema` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRow {
    /// Backend-assigned action id (number or numeric string).
    pub id: ActionId,
    /// Action kind label (`PARADA_TOTAL` / `ADVERTENCIA` / `LOG`).
    #[serde(rename = "accion")]
    pub kind: ActionKind,
    /// Free-text reason.
    #[serde(rename = "motivo")]
    pub reason: String,
    /// ISO-8601 creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ActionRow {
    /// Parse a raw notification payload into an action row.
    pub fn from_value(payload: serde_json::Value) -> Result<Self, MalformedRow> {
        serde_json::from_value(payload).map_err(|source| MalformedRow::Action { source })
    }
}

impl From<ActionRow> for SafetyEvent {
    fn from(row: ActionRow) -> Self {
        Self {
            id: row.id,
            kind: row.kind,
            reason: row.reason,
            occurred_at: row.created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_stop_with_maintenance() {
        let payload = serde_json::json!({
            "estado_operativo": "STOP",
            "modo_mantenimiento": true,
        });
        let row = MachineStatusRow::from_value(payload).unwrap();
        let status = MachineStatus::from(row);
        assert_eq!(status.operative_state, OperativeState::Stop);
        assert!(status.maintenance_mode);
    }

    #[test]
    fn status_row_missing_field_is_malformed() {
        let payload = serde_json::json!({ "estado_operativo": "RUN" });
        let result = MachineStatusRow::from_value(payload);
        assert!(matches!(result, Err(MalformedRow::Status { .. })));
    }

    #[test]
    fn status_row_out_of_range_state_is_malformed() {
        let payload = serde_json::json!({
            "estado_operativo": "PAUSED",
            "modo_mantenimiento": false,
        });
        assert!(MachineStatusRow::from_value(payload).is_err());
    }

    #[test]
    fn parses_action_row_with_numeric_string_id() {
        let payload = serde_json::json!({
            "id": "1733419200000",
            "accion": "ADVERTENCIA",
            "motivo": "Proximidad al borde",
            "created_at": "2026-08-30T12:00:00Z",
        });
        let row = ActionRow::from_value(payload).unwrap();
        assert_eq!(row.id, ActionId(1_733_419_200_000));
        assert_eq!(row.kind, ActionKind::Warning);

        let event = SafetyEvent::from(row);
        assert_eq!(event.reason, "Proximidad al borde");
    }

    #[test]
    fn action_row_ignores_extra_columns() {
        let payload = serde_json::json!({
            "id": 9,
            "accion": "PARADA_TOTAL",
            "motivo": "Intrusión crítica",
            "created_at": "2026-08-30T12:00:00Z",
            "riesgo": 97.5,
        });
        let row = ActionRow::from_value(payload).unwrap();
        assert_eq!(row.kind, ActionKind::TotalStop);
    }

    #[test]
    fn action_row_missing_reason_is_malformed() {
        let payload = serde_json::json!({
            "id": 9,
            "accion": "LOG",
            "created_at": "2026-08-30T12:00:00Z",
        });
        let result = ActionRow::from_value(payload);
        assert!(matches!(result, Err(MalformedRow::Action { .. })));
    }

    #[test]
    fn action_row_bad_timestamp_is_malformed() {
        let payload = serde_json::json!({
            "id": 9,
            "accion": "LOG",
            "motivo": "Acceso técnico autorizado",
            "created_at": "ayer",
        });
        assert!(ActionRow::from_value(payload).is_err());
    }
}
