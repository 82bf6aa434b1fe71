//! Store error types
//!
//! Every error here is recoverable: stores catch it, record the message
//! on their status block, reset busy flags and keep serving.

use thiserror::Error;

/// Errors surfaced by the data stores
#[derive(Error, Debug)]
pub enum StoreError {
    /// Simulated fetch failed (generic)
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// Simulated connection dropped
    #[error("Connection closed: {0}")]
    ConnectionClosed(String),

    /// Analysis target does not exist
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Requested economic context is not seeded
    #[error("Context not found: {0}")]
    ContextNotFound(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
