//! x402 handshake types.

use serde::{Deserialize, Serialize};

/// HTTP header carrying the settled payment proof (middleware → handler).
pub const HEADER_PAYMENT_RESPONSE: &str = "X-PAYMENT-RESPONSE";

// =============================================================================
// Payment Proof
// =============================================================================

/// A client's claim that a priced action was paid for.
///
/// Constructed only by decoding a header value (or by the client-side
/// encoder); immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentProof {
    payer_identity: String,
    transaction_reference: Option<String>,
}

impl PaymentProof {
    pub(crate) fn new(payer_identity: String, transaction_reference: Option<String>) -> Self {
        Self {
            payer_identity,
            transaction_reference,
        }
    }

    /// Payer's account address.
    pub fn payer_identity(&self) -> &str {
        &self.payer_identity
    }

    /// On-chain transaction reference, when the payment mechanism returned one.
    pub fn transaction_reference(&self) -> Option<&str> {
        self.transaction_reference.as_deref()
    }
}

/// A payer identity that passed verification.
///
/// Only the verifier can produce one, so holding a `VerifiedPayer` is proof
/// that the identity check ran.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VerifiedPayer(String);

impl VerifiedPayer {
    pub(crate) fn new(identity: String) -> Self {
        Self(identity)
    }

    /// The payer identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VerifiedPayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Priced Request
// =============================================================================

/// Envelope handed from the price gate to the action.
///
/// Owned by a single request flow. The declared amount is attached by the
/// transport layer once the body is parsed and validated by the action, not by
/// the gate.
#[derive(Debug)]
pub struct PricedRequest {
    payer: VerifiedPayer,
    transaction_reference: Option<String>,
    declared_amount: Option<f64>,
}

impl PricedRequest {
    pub(crate) fn new(payer: VerifiedPayer, transaction_reference: Option<String>) -> Self {
        Self {
            payer,
            transaction_reference,
            declared_amount: None,
        }
    }

    /// Attach the client-declared amount.
    pub fn with_declared_amount(mut self, amount: Option<f64>) -> Self {
        self.declared_amount = amount;
        self
    }

    /// The verified payer.
    pub fn payer(&self) -> &VerifiedPayer {
        &self.payer
    }

    /// Transaction reference from the proof.
    pub fn transaction_reference(&self) -> Option<&str> {
        self.transaction_reference.as_deref()
    }

    /// Amount the client declared for the action.
    pub fn declared_amount(&self) -> Option<f64> {
        self.declared_amount
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Price gate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Header inspected for the payment proof.
    pub header_name: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            header_name: HEADER_PAYMENT_RESPONSE.to_string(),
        }
    }
}
