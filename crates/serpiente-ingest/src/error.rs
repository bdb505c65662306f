//! Error types for the ingestion adapter.

/// Errors that can occur while establishing a change-feed subscription.
///
/// Note what is *not* here: a malformed notification payload is not an
/// error that propagates. It is logged and dropped inside the ingest
/// task so it can never poison the view state.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Connecting or listening on the Postgres change feed failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
