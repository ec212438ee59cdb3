//! Priced actions for the tipjar protocol.
//!
//! This crate sits behind the x402 [`PriceGate`](tipjar_x402::PriceGate): the
//! gate establishes who paid, and the action validates the business
//! parameters and performs its single effect, recording a donation.
//!
//! # Request flow
//!
//! 1. [`DonationEndpoint`] hands the proof header to the gate
//! 2. The body is parsed into a declared amount plus optional name and message
//! 3. [`DonationAction`] enforces the minimum amount and calls the store once
//! 4. The outcome is mapped to an [`HttpReply`]
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tipjar_ops::{DonationAction, DonationConfig, DonationEndpoint};
//! use tipjar_x402::PriceGate;
//!
//! let action = DonationAction::new(Arc::new(store), DonationConfig::default());
//! let endpoint = DonationEndpoint::new(PriceGate::default(), action);
//!
//! let reply = endpoint.write_message(Some(&header), br#"{"amount":25}"#).await;
//! assert_eq!(reply.status, 200);
//! ```

pub mod config;
pub mod dispatcher;
pub mod endpoint;
pub mod error;
pub mod response;

pub use config::DonationConfig;
pub use dispatcher::{confirmation, ActionDispatcher, DonationAck, DonationAction, DonationParams};
pub use endpoint::{DonationEndpoint, WriteMessageBody, DONATE_PATH_PREFIX, WRITE_MESSAGE_PATH};
pub use error::{OpsError, OpsResult, INVALID_REQUEST_MESSAGE};
pub use response::{ApiResponse, HttpReply};
