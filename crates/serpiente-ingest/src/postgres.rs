//! Real change feed: Postgres `LISTEN`/`NOTIFY`.
//!
//! The production backend is a managed Postgres whose row-level
//! triggers `NOTIFY` the new-row image as JSON on the `estado_maquina`
//! (status updates) and `acciones_sistema` (action insertions)
//! channels. This feed listens on both and forwards each payload to
//! the ingest task.
//!
//! There is deliberately no retry, reconnect, or backfill: if the
//! listener errors out the feed terminates, the notification sender is
//! dropped, and the ingest task marks both channels disconnected so
//! the dashboard shows a visible stale indicator.

use sqlx::postgres::PgListener;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use serpiente_types::ChannelKind;

use crate::error::IngestError;
use crate::notification::Notification;
use crate::subscription::Subscription;

/// Change feed backed by a live Postgres connection.
#[derive(Debug, Clone)]
pub struct PgChangeFeed {
    url: String,
}

impl PgChangeFeed {
    /// Create a feed for the given Postgres connection URL.
    pub const fn new(url: String) -> Self {
        Self { url }
    }

    /// Connect, `LISTEN` on both channels, and start the delivery task.
    ///
    /// Notifications are forwarded into `tx` until the listener errors
    /// out or the receiving side is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Database`] if the connection or the
    /// `LISTEN` statements fail. Failures after this point terminate
    /// the feed silently (logged, surfaced as channel health).
    pub async fn subscribe(
        self,
        tx: mpsc::Sender<Notification>,
    ) -> Result<Subscription, IngestError> {
        let mut listener = PgListener::connect(&self.url).await?;
        listener
            .listen_all([
                ChannelKind::MachineStatus.channel_name(),
                ChannelKind::Actions.channel_name(),
            ])
            .await?;
        info!(
            status_channel = ChannelKind::MachineStatus.channel_name(),
            actions_channel = ChannelKind::Actions.channel_name(),
            "listening for Postgres change notifications"
        );

        let task = tokio::spawn(async move {
            loop {
                match listener.recv().await {
                    Ok(delivery) => {
                        let payload: serde_json::Value =
                            match serde_json::from_str(delivery.payload()) {
                                Ok(value) => value,
                                Err(e) => {
                                    warn!(
                                        channel = delivery.channel(),
                                        error = %e,
                                        "dropping non-JSON NOTIFY payload"
                                    );
                                    continue;
                                }
                            };

                        let Some(notification) =
                            Notification::from_channel_name(delivery.channel(), payload)
                        else {
                            warn!(channel = delivery.channel(), "NOTIFY on unknown channel ignored");
                            continue;
                        };

                        if tx.send(notification).await.is_err() {
                            debug!("ingest receiver dropped, stopping Postgres feed");
                            return;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Postgres listener terminated");
                        return;
                    }
                }
            }
        });

        Ok(Subscription::new(vec![task]))
    }
}
