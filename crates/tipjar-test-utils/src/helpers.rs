//! Helper functions for creating test fixtures.

use tipjar_x402::{codec, PriceGate, PricedRequest};

/// A realistic Solana payer address.
pub const TEST_PAYER: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

/// A transaction signature paired with [`TEST_PAYER`].
pub const TEST_SIGNATURE: &str = "mock-signature-123";

/// Encode a proof header for `payer` and optional transaction.
pub fn proof_header(payer: &str, transaction: Option<&str>) -> String {
    codec::encode(payer, transaction)
}

/// Encode the default test proof header.
pub fn test_proof_header() -> String {
    proof_header(TEST_PAYER, Some(TEST_SIGNATURE))
}

/// Run a default gate over a freshly encoded proof and attach `amount`.
///
/// Panics if the gate rejects the proof.
pub async fn priced_request(
    payer: &str,
    transaction: Option<&str>,
    amount: Option<f64>,
) -> PricedRequest {
    PriceGate::default()
        .authorize(Some(&proof_header(payer, transaction)))
        .await
        .expect("test proof should pass the default gate")
        .with_declared_amount(amount)
}

/// Build a JSON request body for the write-message endpoint.
pub fn donation_body(amount: f64, name: Option<&str>, message: Option<&str>) -> Vec<u8> {
    let mut body = serde_json::json!({ "amount": amount });
    if let Some(name) = name {
        body["name"] = name.into();
    }
    if let Some(message) = message {
        body["message"] = message.into();
    }
    body.to_string().into_bytes()
}
