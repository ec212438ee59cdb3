//! Error types for the record store.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors a store collaborator can raise.
///
/// Raising an error is distinct from a soft failure (`Ok(None)` from
/// `record`): errors abort the action, soft failures do not.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store is not configured.
    #[error("store not configured: {0}")]
    Config(String),

    /// Transport-level failure talking to the store.
    #[error("store request failed: {0}")]
    Network(String),

    /// Store answered with a non-success status.
    #[error("store returned {status}: {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Store answered with a body that could not be parsed.
    #[error("malformed store response: {0}")]
    Decode(String),

    /// Any other failure reported by a store implementation.
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Returns true if the operation may succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Rejected { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}
