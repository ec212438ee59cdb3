//! x402 payment-required handshake for priced HTTP actions.
//!
//! A client must present a payment proof before the server performs a priced
//! action. This crate decodes that proof, verifies it against policy, and
//! gates the request, independent of any web framework or chain SDK.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  POST + X-PAYMENT-RESPONSE  ┌──────────────────────────┐
//! │  Client      │ ──────────────────────────→│  PriceGate               │
//! │              │                            │   AwaitingProof          │
//! │              │                            │   → Decoding (codec)     │
//! │              │                            │   → Verifying (verifier) │
//! │              │  402 / 500 on rejection    │   → Authorized           │
//! │              │ ←──────────────────────────│          │               │
//! │              │                            │   PricedRequest          │
//! │              │  200 + acknowledgement     │          ▼               │
//! │              │ ←──────────────────────────│   priced action          │
//! └─────────────┘                             └──────────────────────────┘
//! ```
//!
//! # Components
//!
//! - **[`codec`]**: base64(JSON) proof header encoding and decoding
//! - **[`verifier`]**: identity policy plus a pluggable transaction check
//! - **[`gate`]**: the per-request handshake state machine
//! - **[`discovery`]**: the `/.well-known/x402.json` resource schema
//! - **[`error`]**: rejection taxonomy with HTTP status mapping
//!
//! # Usage
//!
//! ```rust
//! use tipjar_x402::{codec, PriceGate};
//!
//! # async fn example() -> Result<(), tipjar_x402::X402Error> {
//! let gate = PriceGate::default();
//!
//! // Client side: build the proof header.
//! let header = codec::encode("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU", Some("sig1"));
//!
//! // Server side: authorize the request.
//! let request = gate.authorize(Some(&header)).await?;
//! assert_eq!(request.transaction_reference(), Some("sig1"));
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod discovery;
pub mod error;
pub mod gate;
pub mod types;
pub mod verifier;

// Re-export main types
pub use discovery::{DiscoveryConfig, DiscoveryDocument, DonationToken, ResourceEntry};
pub use error::{MalformedProofError, RejectionKind, VerificationError, X402Error, X402Result};
pub use gate::{find_header, GateState, PriceGate};
pub use types::{GateConfig, PaymentProof, PricedRequest, VerifiedPayer, HEADER_PAYMENT_RESPONSE};
pub use verifier::{AcceptAll, CheckFn, PaymentVerifier, TransactionChecker};
