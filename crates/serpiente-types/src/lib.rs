//! Shared type definitions for the S.E.R.P.I.E.N.T.E. SCADA monitoring head.
//!
//! This crate is the single source of truth for the types used across the
//! workspace. Types defined here flow downstream to `TypeScript` via
//! `ts-rs` for the dashboard frontend.
//!
//! # Modules
//!
//! - [`ids`] -- Identifier newtype for safety actions
//! - [`enums`] -- Enumeration types (operating state, action kinds, channels)
//! - [`structs`] -- Core entity structs (machine status, safety events)
//! - [`wire`] -- Row images exactly as the backend tables deliver them

pub mod enums;
pub mod ids;
pub mod structs;
pub mod wire;

// Re-export all public types at crate root for convenience.
pub use enums::{ActionKind, ChannelHealth, ChannelKind, OperativeState};
pub use ids::ActionId;
pub use structs::{MachineStatus, SafetyEvent};
pub use wire::{ActionRow, MachineStatusRow, MalformedRow};
