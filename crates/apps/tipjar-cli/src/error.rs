//! CLI error types.

use thiserror::Error;

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error enum wrapping all crate errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Payment gate rejection.
    #[error("{0}")]
    Payment(#[from] tipjar_x402::X402Error),

    /// Store error.
    #[error("{0}")]
    Store(#[from] tipjar_store::StoreError),

    /// The donation endpoint answered with a non-success status.
    #[error("Request failed with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// IO error.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// User-facing error with actionable message.
    #[error("{0}")]
    User(String),
}

impl CliError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a user-facing error.
    pub fn user(msg: impl Into<String>) -> Self {
        Self::User(msg.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors: 1
            Self::User(_) => 1,
            // Config errors: 3
            Self::Config(_) | Self::Toml(_) => 3,
            // Payment errors: 4
            Self::Payment(_) => 4,
            Self::Rejected { status, .. } if *status == 402 => 4,
            // Store errors: 6
            Self::Store(_) => 6,
            // Endpoint rejections: 8
            Self::Rejected { .. } => 8,
            // IO errors: 9
            Self::Io(_) => 9,
            // JSON/format errors: 10
            Self::Json(_) => 10,
        }
    }

    /// Recovery hint, when one applies.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Payment(e) => Some(e.suggestion()),
            Self::Config(_) | Self::Toml(_) => Some("Check the file passed with --config"),
            Self::Store(e) if e.is_transient() => Some("Retry once the launcher is reachable"),
            _ => None,
        }
    }
}
