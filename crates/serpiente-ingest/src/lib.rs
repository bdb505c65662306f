//! Ingestion adapter for the S.E.R.P.I.E.N.T.E. SCADA monitoring head.
//!
//! Bridges the backend's row-level change notifications into mutations
//! of the dashboard state. The design is message-passing throughout:
//! feed sources push [`Notification`] values into a bounded
//! [`tokio::sync::mpsc`] channel, and a single consumer -- the
//! [`IngestTask`] -- owns the state and is its only writer. No shared
//! mutable memory, no locks on the write path.
//!
//! # Feed sources
//!
//! - [`PgChangeFeed`] -- the real channel: Postgres `LISTEN`/`NOTIFY`
//!   on the `estado_maquina` and `acciones_sistema` channels
//! - [`SimulatedFeed`] -- a timer-driven synthetic source for local
//!   development and tests, shaped by the fuzzy risk engine
//!
//! Both return a [`Subscription`] guard; dropping it (or calling
//! [`Subscription::unsubscribe`]) releases the underlying delivery
//! tasks so no further notification can reach the store.

pub mod adapter;
pub mod error;
pub mod notification;
pub mod postgres;
pub mod simulated;
pub mod subscription;

pub use adapter::{IngestTask, spawn_ingest};
pub use error::IngestError;
pub use notification::{Notification, notification_channel};
pub use postgres::PgChangeFeed;
pub use simulated::SimulatedFeed;
pub use subscription::Subscription;
