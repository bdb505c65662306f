//! HMI binary for the S.E.R.P.I.E.N.T.E. SCADA monitoring head.
//!
//! This is the main entry point that wires together the change feed,
//! the ingest task, and the dashboard server. It loads configuration,
//! initializes all subsystems, and runs until interrupted.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `serpiente-config.yaml`
//! 3. Create the dashboard app state and spawn the HTTP server
//! 4. Subscribe the configured change feed (simulated or Postgres)
//! 5. Spawn the ingest task with the snapshot callback
//! 6. Wait for Ctrl-C; unsubscribe the feed, drain ingest, exit

mod config;
mod error;
mod observer_callback;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serpiente_ingest::{PgChangeFeed, SimulatedFeed, Subscription, notification_channel, spawn_ingest};
use serpiente_observer::{AppState, ServerConfig, spawn_observer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{FeedMode, HmiConfig};
use crate::error::HmiError;
use crate::observer_callback::SnapshotCallback;

/// Default configuration file path, relative to the working directory.
const CONFIG_PATH: &str = "serpiente-config.yaml";

/// Application entry point for the HMI.
///
/// # Errors
///
/// Returns an error if any initialization step fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("serpiente-hmi starting");

    // 2. Load configuration.
    let config = HmiConfig::load_or_default(Path::new(CONFIG_PATH)).map_err(HmiError::from)?;
    info!(
        host = config.server.host,
        port = config.server.port,
        feed_mode = ?config.feed.mode,
        "Configuration loaded"
    );

    // 3. Create the dashboard app state and spawn the HTTP server.
    let app_state = Arc::new(AppState::new());
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let server_handle = spawn_observer(server_config, Arc::clone(&app_state))
        .await
        .map_err(HmiError::from)?;
    info!(port = config.server.port, "Dashboard server started");

    // 4. Subscribe the configured change feed.
    let (tx, rx) = notification_channel();
    let subscription: Subscription = match config.feed.mode {
        FeedMode::Simulated => {
            let mut feed =
                SimulatedFeed::new().with_period(Duration::from_millis(config.feed.period_ms));
            if let Some(seed) = config.feed.seed {
                feed = feed.with_seed(seed);
            }
            feed.subscribe(tx)
        }
        FeedMode::Postgres => {
            PgChangeFeed::new(config.infrastructure.postgres_url.clone())
                .subscribe(tx)
                .await
                .map_err(HmiError::from)?
        }
    };
    info!("Change feed subscribed");

    // 5. Spawn the ingest task with the snapshot callback.
    let callback = SnapshotCallback::new(Arc::clone(&app_state));
    let ingest_handle = spawn_ingest(Box::new(callback), rx);
    info!("Ingest task running");

    // 6. Wait for Ctrl-C, then tear down: unsubscribe the feed first
    //    so the ingest task drains and marks the channels disconnected,
    //    then stop the server.
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    subscription.unsubscribe().await;
    match ingest_handle.await {
        Ok(state) => info!(
            operative_state = state.current_status().operative_state.label(),
            events = state.recent_events().len(),
            "ingest task drained"
        ),
        Err(e) => warn!(error = %e, "ingest task did not drain cleanly"),
    }
    server_handle.abort();
    info!("serpiente-hmi stopped");

    Ok(())
}
