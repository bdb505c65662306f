//! Dashboard API server for the S.E.R.P.I.E.N.T.E. SCADA monitoring head.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws/dashboard`) for real-time state
//!   streaming via [`tokio::sync::broadcast`]
//! - **REST endpoints** for the machine status, the rolling event log,
//!   and a combined polling fallback (`/api/live`)
//! - **Minimal HTML panel** (`GET /`) showing the current machine
//!   state and channel health
//!
//! # Architecture
//!
//! The server reads from an in-memory [`DashboardSnapshot`] that the
//! HMI binary refreshes on every state change via its ingest callback.
//! All REST reads are served from this snapshot so the server never
//! blocks ingestion. `WebSocket` clients receive state changes via a
//! broadcast channel with automatic lag handling.
//!
//! [`DashboardSnapshot`]: state::DashboardSnapshot

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::{StartupError, spawn_observer};
pub use state::{AppState, DashboardBroadcast, DashboardSnapshot};
