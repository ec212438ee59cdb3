//! Integration tests for the write-message flow.
//!
//! These tests drive `DonationEndpoint` end to end (gate, body parsing,
//! donation action) against the `MockStore` from tipjar-test-utils and check
//! the HTTP status, the reply body and the store calls.

use std::sync::Arc;

use tipjar_ops::{
    ActionDispatcher, DonationAction, DonationConfig, DonationEndpoint, DonationParams, OpsError,
};
use tipjar_test_utils::{
    donation_body, priced_request, proof_header, test_proof_header, MockStore, StoreBehavior,
    TEST_PAYER, TEST_SIGNATURE,
};
use tipjar_x402::discovery::DONATION_TIERS_USD;
use tipjar_x402::{CheckFn, GateConfig, PaymentVerifier, PriceGate};

fn endpoint_with(store: &MockStore, gate: PriceGate) -> DonationEndpoint {
    DonationEndpoint::new(
        gate,
        DonationAction::new(Arc::new(store.clone()), DonationConfig::default()),
    )
}

fn endpoint(store: &MockStore) -> DonationEndpoint {
    endpoint_with(store, PriceGate::default())
}

// =============================================================================
// Successful Donations
// =============================================================================

#[tokio::test]
async fn test_donation_with_name_and_message() {
    let store = MockStore::new();
    let header = proof_header(TEST_PAYER, Some("sig1"));
    let body = donation_body(25.0, Some("Alice"), Some("Great project!"));

    let reply = endpoint(&store).write_message(Some(&header), &body).await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["success"], true);
    let message = reply.body["message"].as_str().unwrap();
    assert!(message.contains("Alice"));
    assert!(message.contains("$25"));

    let data = &reply.body["data"];
    assert_eq!(data["donator"], TEST_PAYER);
    assert_eq!(data["amountUsd"], 25.0);
    assert_eq!(data["currency"], "USDC");
    assert_eq!(data["transactionSignature"], "sig1");
    assert_eq!(data["name"], "Alice");
    assert_eq!(data["message"], "Great project!");

    let call = store.last_record_call().unwrap();
    assert_eq!(call.donor_address, TEST_PAYER);
    assert_eq!(call.amount_usd, 25.0);
    assert_eq!(call.name.as_deref(), Some("Alice"));
    assert_eq!(call.message.as_deref(), Some("Great project!"));
    assert_eq!(call.transaction_signature.as_deref(), Some("sig1"));
}

#[tokio::test]
async fn test_donation_without_optional_fields() {
    let store = MockStore::new();
    let header = test_proof_header();
    let body = donation_body(10.0, None, None);

    let reply = endpoint(&store).write_message(Some(&header), &body).await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["message"], "Thank you for your $10 donation!");
    assert!(reply.body["data"]["name"].is_null());
    assert!(reply.body["data"]["message"].is_null());
    assert_eq!(reply.body["data"]["transactionSignature"], TEST_SIGNATURE);

    let call = store.last_record_call().unwrap();
    assert_eq!(call.name, None);
    assert_eq!(call.message, None);
}

#[tokio::test]
async fn test_proof_without_transaction_reports_null_signature() {
    let store = MockStore::new();
    let header = proof_header(TEST_PAYER, None);
    let body = donation_body(2.0, None, None);

    let reply = endpoint(&store).write_message(Some(&header), &body).await;

    assert_eq!(reply.status, 200);
    assert!(reply.body["data"]["transactionSignature"].is_null());
    assert_eq!(store.last_record_call().unwrap().transaction_signature, None);
}

// =============================================================================
// Gate Rejections
// =============================================================================

#[tokio::test]
async fn test_missing_proof_is_checked_before_amount() {
    let store = MockStore::new();
    let endpoint = endpoint(&store);

    for amount in [0.001, 10.0] {
        let reply = endpoint
            .write_message(None, &donation_body(amount, None, None))
            .await;
        assert_eq!(reply.status, 402);
        assert_eq!(reply.error_message(), Some("Payment verification failed"));
        assert_eq!(reply.body["success"], false);
    }

    let reply = endpoint.write_message(Some("   "), b"{}").await;
    assert_eq!(reply.status, 402);
    assert_eq!(store.record_call_count(), 0);
}

#[tokio::test]
async fn test_invalid_proof_is_500() {
    let store = MockStore::new();
    let body = donation_body(10.0, None, None);

    let reply = endpoint(&store)
        .write_message(Some("invalid-base64-!!!"), &body)
        .await;

    assert_eq!(reply.status, 500);
    assert_eq!(reply.error_message(), Some("Invalid payment response"));
    assert_eq!(store.record_call_count(), 0);
}

#[tokio::test]
async fn test_unpadded_proof_is_accepted() {
    use base64::Engine as _;

    let store = MockStore::new();
    let header = base64::engine::general_purpose::STANDARD_NO_PAD.encode(r#"{"payer":"ab"}"#);

    let reply = endpoint(&store)
        .write_message(Some(&header), &donation_body(5.0, None, None))
        .await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["data"]["donator"], "ab");
    assert_eq!(store.record_call_count(), 1);
}

#[tokio::test]
async fn test_rejected_payment_is_402() {
    let store = MockStore::new();
    let verifier = PaymentVerifier::new(Arc::new(CheckFn::new(|_payer, reference| {
        reference == Some("settled")
    })));
    let gate = PriceGate::new(GateConfig::default(), verifier);
    let endpoint = endpoint_with(&store, gate);
    let body = donation_body(10.0, None, None);

    let reply = endpoint
        .write_message(Some(&proof_header(TEST_PAYER, Some("unknown"))), &body)
        .await;
    assert_eq!(reply.status, 402);
    assert_eq!(reply.error_message(), Some("Payment verification failed"));
    assert_eq!(store.record_call_count(), 0);

    let reply = endpoint
        .write_message(Some(&proof_header(TEST_PAYER, Some("settled"))), &body)
        .await;
    assert_eq!(reply.status, 200);
    assert_eq!(store.record_call_count(), 1);
}

// =============================================================================
// Amount Validation
// =============================================================================

#[tokio::test]
async fn test_amount_below_minimum() {
    let store = MockStore::new();
    let header = test_proof_header();

    let reply = endpoint(&store)
        .write_message(Some(&header), &donation_body(0.009, None, None))
        .await;

    assert_eq!(reply.status, 400);
    assert_eq!(reply.error_message(), Some("Amount must be at least $0.01"));
    assert_eq!(store.record_call_count(), 0);
}

#[tokio::test]
async fn test_missing_or_non_numeric_amount() {
    let store = MockStore::new();
    let header = test_proof_header();
    let endpoint = endpoint(&store);

    let bodies: [&[u8]; 4] = [
        br#"{}"#,
        br#"{"amount":"ten"}"#,
        br#"{"amount":null}"#,
        br#"{"amount":0}"#,
    ];
    for body in bodies {
        let reply = endpoint.write_message(Some(&header), body).await;
        assert_eq!(reply.status, 400);
        assert_eq!(reply.error_message(), Some("Amount must be at least $0.01"));
    }
    assert_eq!(store.record_call_count(), 0);
}

// =============================================================================
// Store Failures
// =============================================================================

#[tokio::test]
async fn test_soft_store_failure_still_acknowledges() {
    let store = MockStore::soft_failing();
    let header = test_proof_header();

    let reply = endpoint(&store)
        .write_message(Some(&header), &donation_body(12.5, Some("Bob"), None))
        .await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["success"], true);
    assert_eq!(reply.body["data"]["amountUsd"], 12.5);
    assert_eq!(reply.body["data"]["currency"], "USDC");
    assert_eq!(store.record_call_count(), 1);
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn test_store_error_surfaces_verbatim() {
    let store = MockStore::failing("Database connection failed");
    let header = test_proof_header();

    let reply = endpoint(&store)
        .write_message(Some(&header), &donation_body(10.0, None, None))
        .await;

    assert_eq!(reply.status, 500);
    assert_eq!(reply.error_message(), Some("Database connection failed"));
    assert_eq!(store.record_call_count(), 1);
}

#[tokio::test]
async fn test_store_error_carries_declared_amount() {
    let store = MockStore::failing("launcher unavailable");
    let action = DonationAction::new(Arc::new(store.clone()), DonationConfig::default());
    let request = priced_request(TEST_PAYER, None, Some(42.0)).await;

    let err = action
        .handle(request, DonationParams::default())
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), 500);
    match err {
        OpsError::RecordingFailed { message, amount } => {
            assert_eq!(message, "launcher unavailable");
            assert_eq!(amount, 42.0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_store_recovers_between_requests() {
    let store = MockStore::failing("temporarily down");
    let header = test_proof_header();
    let endpoint = endpoint(&store);
    let body = donation_body(1.0, None, None);

    let reply = endpoint.write_message(Some(&header), &body).await;
    assert_eq!(reply.status, 500);

    store.set_behavior(StoreBehavior::Store {
        currency: Some("USDC".to_string()),
    });
    let reply = endpoint.write_message(Some(&header), &body).await;
    assert_eq!(reply.status, 200);
    assert_eq!(store.record_call_count(), 2);
    assert_eq!(store.records().len(), 1);
}

// =============================================================================
// Fixed Tiers
// =============================================================================

#[tokio::test]
async fn test_fixed_tiers() {
    let store = MockStore::new();
    let header = test_proof_header();
    let endpoint = endpoint(&store);

    for tier in DONATION_TIERS_USD {
        let reply = endpoint.donate_fixed(Some(&header), tier as f64).await;
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body["data"]["amountUsd"], tier as f64);
    }

    let amounts: Vec<f64> = store.record_calls().iter().map(|c| c.amount_usd).collect();
    assert_eq!(amounts, vec![1.0, 5.0, 10.0]);
}
