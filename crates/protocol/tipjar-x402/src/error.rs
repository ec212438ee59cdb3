//! Error types for the x402 payment handshake.

use thiserror::Error;

/// Result type for gate operations.
pub type X402Result<T> = Result<T, X402Error>;

/// The payment-proof header could not be decoded.
///
/// Decoding is purely syntactic, so every variant describes a shape problem
/// with the header value rather than a problem with the payment itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedProofError {
    /// Header value is not standard base64.
    #[error("payment proof is not valid base64: {0}")]
    Base64(String),

    /// Decoded bytes are not valid JSON.
    #[error("payment proof is not valid JSON: {0}")]
    Json(String),

    /// Decoded JSON is valid but not an object.
    #[error("payment proof must be a JSON object")]
    NotAnObject,

    /// The object has no `payer` field of string type.
    #[error("payment proof is missing the `payer` string field")]
    MissingPayer,
}

/// A decoded proof failed the payment policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The payer identity is empty or whitespace.
    #[error("payment proof carries an empty payer identity")]
    EmptyPayer,

    /// The transaction-check collaborator refused the payment.
    #[error("transaction check refused payment from {payer}")]
    PaymentRejected {
        /// Payer that presented the proof
        payer: String,
        /// Transaction reference that was checked, if any
        transaction: Option<String>,
    },
}

/// Coarse rejection category reported by the price gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionKind {
    /// No proof was presented.
    PaymentRequired,
    /// A proof was presented but could not be decoded.
    InvalidProof,
    /// A proof was decoded but failed verification.
    PaymentRejected,
}

impl RejectionKind {
    /// HTTP status a transport layer should answer with.
    ///
    /// `InvalidProof` maps to 500: the proof header is written by the payment
    /// middleware after settlement, not by the caller.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::PaymentRequired | Self::PaymentRejected => 402,
            Self::InvalidProof => 500,
        }
    }

    /// Message exposed to the client in the error body.
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::PaymentRequired | Self::PaymentRejected => "Payment verification failed",
            Self::InvalidProof => "Invalid payment response",
        }
    }
}

/// Errors produced by the price gate. Every variant is terminal for the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum X402Error {
    /// No proof header was presented.
    #[error("payment required: no proof presented in {header}")]
    PaymentRequired {
        /// Header that was inspected
        header: String,
    },

    /// The proof header was present but could not be decoded.
    #[error("invalid payment proof: {0}")]
    InvalidProof(#[from] MalformedProofError),

    /// The proof decoded but did not pass verification.
    #[error("payment rejected: {0}")]
    PaymentRejected(#[from] VerificationError),
}

impl X402Error {
    /// Rejection category of this error.
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::PaymentRequired { .. } => RejectionKind::PaymentRequired,
            Self::InvalidProof(_) => RejectionKind::InvalidProof,
            Self::PaymentRejected(_) => RejectionKind::PaymentRejected,
        }
    }

    /// Returns the HTTP status code appropriate for this error.
    pub fn http_status(&self) -> u16 {
        self.kind().http_status()
    }

    /// Returns the message to put in the client-facing error body.
    pub fn client_message(&self) -> &'static str {
        self.kind().client_message()
    }

    /// Returns a user-friendly suggestion for recovering from this error.
    pub fn suggestion(&self) -> &str {
        match self {
            Self::PaymentRequired { .. } => "Complete the payment and resubmit with the proof header",
            Self::InvalidProof(_) => "Check that the proof header is base64-encoded JSON with a payer",
            Self::PaymentRejected(_) => "Resubmit with a proof for a settled payment",
        }
    }
}
