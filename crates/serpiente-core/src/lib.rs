//! Core state model for the S.E.R.P.I.E.N.T.E. SCADA monitoring head.
//!
//! This crate holds the behavioral heart of the dashboard:
//!
//! - [`store`] -- the [`DashboardState`](store::DashboardState) owned by
//!   the ingest task: current machine status plus the rolling log of the
//!   five most recent safety events
//! - [`health`] -- per-channel link health so the frontend can render a
//!   visible stale/disconnected indicator
//! - [`callback`] -- the seam through which every state mutation is
//!   published to the rendering layer
//! - [`risk`] -- the 12-rule fuzzy inference engine used by the
//!   simulated change feed to fabricate physically plausible payloads

pub mod callback;
pub mod health;
pub mod risk;
pub mod store;

pub use callback::{NoopCallback, StateCallback, StateChange};
pub use health::{ChannelLinks, LinkState};
pub use store::{DashboardState, EVENT_LOG_CAP};
