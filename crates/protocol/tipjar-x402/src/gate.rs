//! Price gate for x402-protected actions.
//!
//! The `PriceGate` runs one pass of the payment handshake per request:
//! 1. Look for the proof header (`AwaitingProof`)
//! 2. Decode it (`Decoding`)
//! 3. Verify the decoded proof (`Verifying`)
//! 4. Hand a `PricedRequest` to the action, or reject
//!
//! The gate holds no per-request state between calls and never retries.

use tracing::{debug, info, warn};

use crate::codec;
use crate::error::{X402Error, X402Result};
use crate::types::{GateConfig, PaymentProof, PricedRequest};
use crate::verifier::PaymentVerifier;

/// States of the per-request handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Looking for the proof header.
    AwaitingProof,
    /// Decoding the header value.
    Decoding,
    /// Running the verifier.
    Verifying,
    /// Terminal: the request may proceed.
    Authorized,
    /// Terminal: the request was refused.
    Rejected,
}

impl GateState {
    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Authorized | Self::Rejected)
    }
}

enum Step<'a> {
    AwaitingProof(Option<&'a str>),
    Decoding(&'a str),
    Verifying(PaymentProof),
}

impl Step<'_> {
    fn state(&self) -> GateState {
        match self {
            Self::AwaitingProof(_) => GateState::AwaitingProof,
            Self::Decoding(_) => GateState::Decoding,
            Self::Verifying(_) => GateState::Verifying,
        }
    }
}

/// Gate deciding whether a request may reach its priced action.
#[derive(Debug, Clone, Default)]
pub struct PriceGate {
    config: GateConfig,
    verifier: PaymentVerifier,
}

impl PriceGate {
    /// Create a gate with the given configuration and verifier.
    pub fn new(config: GateConfig, verifier: PaymentVerifier) -> Self {
        Self { config, verifier }
    }

    /// Name of the header carrying the proof.
    pub fn header_name(&self) -> &str {
        &self.config.header_name
    }

    /// Get the current configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Run the handshake for one request given the raw proof header value.
    ///
    /// An absent or blank header is a `PaymentRequired` rejection.
    pub async fn authorize(&self, proof_header: Option<&str>) -> X402Result<PricedRequest> {
        let mut step = Step::AwaitingProof(proof_header);

        loop {
            debug!(state = ?step.state(), "Price gate step");
            step = match step {
                Step::AwaitingProof(header) => match header.filter(|h| !h.trim().is_empty()) {
                    Some(value) => Step::Decoding(value),
                    None => {
                        return self.reject(X402Error::PaymentRequired {
                            header: self.config.header_name.clone(),
                        })
                    }
                },
                Step::Decoding(value) => match codec::decode(value) {
                    Ok(proof) => Step::Verifying(proof),
                    Err(e) => return self.reject(e.into()),
                },
                Step::Verifying(proof) => match self.verifier.verify(&proof).await {
                    Ok(payer) => {
                        info!(
                            state = ?GateState::Authorized,
                            payer = %payer,
                            transaction = ?proof.transaction_reference(),
                            "Payment proof accepted"
                        );
                        let reference = proof.transaction_reference().map(str::to_string);
                        return Ok(PricedRequest::new(payer, reference));
                    }
                    Err(e) => return self.reject(e.into()),
                },
            };
        }
    }

    /// Run the handshake, looking the proof header up in a header list.
    ///
    /// Header names are matched case-insensitively; the first match wins.
    pub async fn authorize_headers<'a, I>(&self, headers: I) -> X402Result<PricedRequest>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let value = find_header(headers, &self.config.header_name);
        self.authorize(value).await
    }

    fn reject(&self, error: X402Error) -> X402Result<PricedRequest> {
        warn!(
            state = ?GateState::Rejected,
            kind = ?error.kind(),
            status = error.http_status(),
            error = %error,
            "Payment gate rejected request"
        );
        Err(error)
    }
}

/// Find a header value by case-insensitive name.
pub fn find_header<'a, I>(headers: I, name: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    headers
        .into_iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MalformedProofError, RejectionKind, VerificationError};
    use crate::verifier::{CheckFn, TransactionChecker};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingChecker {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TransactionChecker for CountingChecker {
        async fn check_transaction(&self, _payer: &str, _reference: Option<&str>) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            true
        }
    }

    #[test]
    fn test_terminal_states() {
        assert!(GateState::Authorized.is_terminal());
        assert!(GateState::Rejected.is_terminal());
        assert!(!GateState::AwaitingProof.is_terminal());
        assert!(!GateState::Decoding.is_terminal());
        assert!(!GateState::Verifying.is_terminal());
    }

    #[tokio::test]
    async fn test_missing_header_is_payment_required() {
        let checker = Arc::new(CountingChecker::default());
        let gate = PriceGate::new(GateConfig::default(), PaymentVerifier::new(checker.clone()));

        let err = gate.authorize(None).await.unwrap_err();
        assert_eq!(err.kind(), RejectionKind::PaymentRequired);
        assert_eq!(err.http_status(), 402);

        let err = gate.authorize(Some("   ")).await.unwrap_err();
        assert_eq!(err.kind(), RejectionKind::PaymentRequired);

        assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_undecodable_header_is_invalid_proof() {
        let checker = Arc::new(CountingChecker::default());
        let gate = PriceGate::new(GateConfig::default(), PaymentVerifier::new(checker.clone()));

        let err = gate.authorize(Some("invalid-base64-!!!")).await.unwrap_err();
        assert!(matches!(
            err,
            X402Error::InvalidProof(MalformedProofError::Base64(_))
        ));
        assert_eq!(err.client_message(), "Invalid payment response");
        assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_payer_is_payment_rejected() {
        let gate = PriceGate::default();
        let err = gate.authorize(Some(&codec::encode("", None))).await.unwrap_err();
        assert_eq!(
            err,
            X402Error::PaymentRejected(VerificationError::EmptyPayer)
        );
    }

    #[tokio::test]
    async fn test_checker_refusal_is_payment_rejected() {
        let verifier = PaymentVerifier::new(Arc::new(CheckFn::new(|_payer, _reference| false)));
        let gate = PriceGate::new(GateConfig::default(), verifier);

        let err = gate
            .authorize(Some(&codec::encode("payer", Some("sig"))))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), RejectionKind::PaymentRejected);
    }

    #[tokio::test]
    async fn test_valid_proof_is_authorized() {
        let checker = Arc::new(CountingChecker::default());
        let gate = PriceGate::new(GateConfig::default(), PaymentVerifier::new(checker.clone()));

        let request = gate
            .authorize(Some(&codec::encode("7xKX", Some("sig1"))))
            .await
            .unwrap();
        assert_eq!(request.payer().as_str(), "7xKX");
        assert_eq!(request.transaction_reference(), Some("sig1"));
        assert_eq!(request.declared_amount(), None);
        assert_eq!(checker.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_authorize_headers_case_insensitive() {
        let gate = PriceGate::default();
        let header = codec::encode("payer", None);
        let headers = vec![
            ("content-type", "application/json"),
            ("x-payment-response", header.as_str()),
        ];

        let request = gate.authorize_headers(headers).await.unwrap();
        assert_eq!(request.payer().as_str(), "payer");
    }

    #[tokio::test]
    async fn test_custom_header_name() {
        let config = GateConfig {
            header_name: "X-PROOF".to_string(),
        };
        let gate = PriceGate::new(config, PaymentVerifier::accept_all());
        assert_eq!(gate.header_name(), "X-PROOF");

        let header = codec::encode("payer", None);
        let err = gate
            .authorize_headers(vec![("X-PAYMENT-RESPONSE", header.as_str())])
            .await
            .unwrap_err();
        assert!(matches!(err, X402Error::PaymentRequired { ref header } if header == "X-PROOF"));
    }

    #[test]
    fn test_find_header() {
        let headers = [("A", "1"), ("b", "2"), ("B", "3")];
        assert_eq!(find_header(headers, "a"), Some("1"));
        assert_eq!(find_header(headers, "B"), Some("2"));
        assert_eq!(find_header(headers, "c"), None);
    }

    #[tokio::test]
    async fn test_gate_is_shareable_across_tasks() {
        let gate = Arc::new(PriceGate::default());
        let mut handles = Vec::new();
        for i in 0..8 {
            let gate = gate.clone();
            handles.push(tokio::spawn(async move {
                let header = codec::encode(&format!("payer-{}", i), None);
                gate.authorize(Some(&header))
                    .await
                    .map(|r| r.payer().as_str().to_string())
            }));
        }
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.await.unwrap().unwrap(), format!("payer-{}", i));
        }
    }
}
