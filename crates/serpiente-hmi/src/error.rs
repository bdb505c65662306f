//! Error types for the HMI binary.

use crate::config::ConfigError;

/// Top-level errors that abort HMI startup.
#[derive(Debug, thiserror::Error)]
pub enum HmiError {
    /// Configuration could not be loaded or parsed.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The change-feed subscription could not be established.
    #[error("ingest error: {0}")]
    Ingest(#[from] serpiente_ingest::IngestError),

    /// The dashboard server could not be spawned.
    #[error("observer error: {0}")]
    Observer(#[from] serpiente_observer::StartupError),
}
