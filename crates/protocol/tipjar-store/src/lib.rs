//! Donation record store for the tipjar protocol.
//!
//! The priced donation action records each accepted payment through a
//! [`DonationStore`]. Production deployments talk to the launcher service via
//! [`LauncherStore`]; tests substitute an in-memory mock.
//!
//! # Failure modes
//!
//! - `Ok(None)` from [`DonationStore::record`] is a soft failure: nothing was
//!   recorded, but the payment was already accepted and the caller may still
//!   acknowledge it.
//! - `Err(StoreError)` is a hard failure and aborts the action.

pub mod config;
pub mod error;
pub mod launcher;
pub mod traits;
pub mod types;

pub use config::LauncherConfig;
pub use error::{StoreError, StoreResult};
pub use launcher::LauncherStore;
pub use traits::DonationStore;
pub use types::{DonationPage, DonationRecord, DonationStats, NewDonation, SortKey};
