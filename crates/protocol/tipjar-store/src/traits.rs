//! Record-store trait definition.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{DonationPage, DonationRecord, DonationStats, NewDonation, SortKey};

/// Trait for the external donation store.
///
/// This trait abstracts the record-keeping service, allowing for:
/// - The launcher HTTP API in production
/// - A mock implementation for testing
///
/// `record` distinguishes two failure modes: `Ok(None)` is a soft failure
/// (nothing recorded, caller may still acknowledge), `Err` is a hard failure.
#[async_trait]
pub trait DonationStore: Send + Sync {
    /// Record a donation.
    async fn record(&self, donation: NewDonation) -> StoreResult<Option<DonationRecord>>;

    /// One page of recorded donations. `page` is 1-based.
    async fn list(&self, page: u32, limit: u32, sort: SortKey) -> StoreResult<DonationPage>;

    /// Aggregate donation figures.
    async fn stats(&self) -> StoreResult<DonationStats>;
}
