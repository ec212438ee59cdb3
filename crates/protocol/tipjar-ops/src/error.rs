//! Error types for the operations layer.
//!
//! `OpsError` covers the whole priced request: gate rejections are wrapped
//! unchanged, and the action adds its own domain failures.

use thiserror::Error;
use tipjar_x402::X402Error;

/// Result type for operations.
pub type OpsResult<T> = std::result::Result<T, OpsError>;

/// Message returned when the request body cannot be used.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request body";

/// Errors that can occur while handling a priced request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OpsError {
    /// The price gate refused the request.
    #[error(transparent)]
    Gate(#[from] X402Error),

    /// Declared amount missing or below the minimum. No side effect occurred.
    #[error("Amount must be at least ${min}")]
    InvalidAmount {
        /// Minimum accepted amount
        min: f64,
    },

    /// Request body is not a JSON object.
    #[error("invalid request body: {0}")]
    InvalidRequest(String),

    /// The record store raised an error.
    #[error("{message}")]
    RecordingFailed {
        /// Store error message, verbatim
        message: String,
        /// Amount the client declared
        amount: f64,
    },
}

impl OpsError {
    /// Returns the HTTP status code appropriate for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Gate(e) => e.http_status(),
            Self::InvalidAmount { .. } | Self::InvalidRequest(_) => 400,
            Self::RecordingFailed { .. } => 500,
        }
    }

    /// Message to put in the client-facing error body.
    pub fn client_message(&self) -> String {
        match self {
            Self::Gate(e) => e.client_message().to_string(),
            Self::InvalidRequest(_) => INVALID_REQUEST_MESSAGE.to_string(),
            Self::InvalidAmount { .. } | Self::RecordingFailed { .. } => self.to_string(),
        }
    }

    /// Hint for resolving the error.
    pub fn suggestion(&self) -> &str {
        match self {
            Self::Gate(e) => e.suggestion(),
            Self::InvalidAmount { .. } => "Declare a larger amount in the request body",
            Self::InvalidRequest(_) => "Send a JSON object body with a numeric amount",
            Self::RecordingFailed { .. } => "The payment was accepted; check the donation store",
        }
    }

    /// Whether the failure was caused by the client's input or payment.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tipjar_x402::MalformedProofError;

    #[test]
    fn test_invalid_amount_message() {
        let err = OpsError::InvalidAmount { min: 0.01 };
        assert_eq!(err.client_message(), "Amount must be at least $0.01");
        assert_eq!(err.http_status(), 400);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_recording_failed_is_verbatim() {
        let err = OpsError::RecordingFailed {
            message: "Database connection failed".into(),
            amount: 10.0,
        };
        assert_eq!(err.client_message(), "Database connection failed");
        assert_eq!(err.http_status(), 500);
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_gate_errors_pass_through() {
        let err: OpsError = X402Error::PaymentRequired {
            header: "X-PAYMENT-RESPONSE".into(),
        }
        .into();
        assert_eq!(err.http_status(), 402);
        assert_eq!(err.client_message(), "Payment verification failed");

        let err: OpsError = X402Error::InvalidProof(MalformedProofError::NotAnObject).into();
        assert_eq!(err.http_status(), 500);
        assert_eq!(err.client_message(), "Invalid payment response");
    }

    #[test]
    fn test_invalid_request() {
        let err = OpsError::InvalidRequest("expected value".into());
        assert_eq!(err.client_message(), "Invalid request body");
        assert_eq!(err.http_status(), 400);
    }
}
