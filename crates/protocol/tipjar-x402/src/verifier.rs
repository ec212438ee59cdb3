//! Payment verification policy.
//!
//! The verifier always enforces a non-empty payer identity, then defers to a
//! pluggable [`TransactionChecker`] for anything deeper (e.g. looking the
//! transaction up on a ledger).

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::VerificationError;
use crate::types::{PaymentProof, VerifiedPayer};

/// Extension point for ledger-level payment checks.
///
/// Implementations may perform I/O; they own any timeout policy they need.
#[async_trait]
pub trait TransactionChecker: Send + Sync {
    /// Returns `true` when the payment described by `payer`/`reference` is acceptable.
    async fn check_transaction(&self, payer: &str, reference: Option<&str>) -> bool;
}

/// Checker that accepts every payment which passed the identity check.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

#[async_trait]
impl TransactionChecker for AcceptAll {
    async fn check_transaction(&self, _payer: &str, _reference: Option<&str>) -> bool {
        true
    }
}

/// Adapts a synchronous predicate into a [`TransactionChecker`].
pub struct CheckFn<F>(pub F);

impl<F> CheckFn<F>
where
    F: Fn(&str, Option<&str>) -> bool + Send + Sync,
{
    /// Wrap a predicate.
    pub fn new(predicate: F) -> Self {
        Self(predicate)
    }
}

#[async_trait]
impl<F> TransactionChecker for CheckFn<F>
where
    F: Fn(&str, Option<&str>) -> bool + Send + Sync,
{
    async fn check_transaction(&self, payer: &str, reference: Option<&str>) -> bool {
        (self.0)(payer, reference)
    }
}

/// Validates decoded proofs.
#[derive(Clone)]
pub struct PaymentVerifier {
    checker: Arc<dyn TransactionChecker>,
}

impl PaymentVerifier {
    /// Create a verifier backed by the given transaction checker.
    pub fn new(checker: Arc<dyn TransactionChecker>) -> Self {
        Self { checker }
    }

    /// Create a verifier that only enforces the identity check.
    pub fn accept_all() -> Self {
        Self::new(Arc::new(AcceptAll))
    }

    /// Verify a proof.
    ///
    /// The identity check runs first and never calls the checker on failure.
    pub async fn verify(&self, proof: &PaymentProof) -> Result<VerifiedPayer, VerificationError> {
        let payer = proof.payer_identity();
        if payer.trim().is_empty() {
            return Err(VerificationError::EmptyPayer);
        }

        let reference = proof.transaction_reference();
        if !self.checker.check_transaction(payer, reference).await {
            warn!(payer = %payer, transaction = ?reference, "Transaction check rejected payment");
            return Err(VerificationError::PaymentRejected {
                payer: payer.to_string(),
                transaction: reference.map(str::to_string),
            });
        }

        debug!(payer = %payer, "Payment proof verified");
        Ok(VerifiedPayer::new(payer.to_string()))
    }
}

impl Default for PaymentVerifier {
    fn default() -> Self {
        Self::accept_all()
    }
}

impl std::fmt::Debug for PaymentVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentVerifier").finish_non_exhaustive()
    }
}
