//! Mock implementation of the `DonationStore` trait for testing.
//!
//! Records every call in memory and answers according to a configurable
//! behavior, so tests can assert on call counts and exercise soft and hard
//! store failures.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, RwLock};
use tipjar_store::{
    DonationPage, DonationRecord, DonationStats, DonationStore, NewDonation, SortKey, StoreError,
    StoreResult,
};

/// How the mock answers `record` calls.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBehavior {
    /// Store the donation and report the given currency.
    Store {
        /// Currency echoed in the stored record
        currency: Option<String>,
    },
    /// Return `Ok(None)` (store unreachable or misconfigured).
    SoftFail,
    /// Return an error with the given message.
    Fail(String),
}

struct MockStoreInner {
    behavior: StoreBehavior,
    /// Every donation passed to `record`, in call order.
    record_calls: Vec<NewDonation>,
    /// Donations that were actually stored.
    records: Vec<DonationRecord>,
    /// Arguments of every `list` call.
    list_calls: Vec<(u32, u32, SortKey)>,
    next_id: u64,
}

/// A mock implementation of the `DonationStore` trait for testing.
///
/// Uses `Arc<RwLock<...>>` internally, so it is cheap to clone and all clones
/// share the same state.
#[derive(Clone)]
pub struct MockStore {
    inner: Arc<RwLock<MockStoreInner>>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    /// Create a mock that stores donations in USDC.
    pub fn new() -> Self {
        Self::with_behavior(StoreBehavior::Store {
            currency: Some("USDC".to_string()),
        })
    }

    /// Create a mock with a specific behavior.
    pub fn with_behavior(behavior: StoreBehavior) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MockStoreInner {
                behavior,
                record_calls: Vec::new(),
                records: Vec::new(),
                list_calls: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Create a mock whose `record` soft-fails.
    pub fn soft_failing() -> Self {
        Self::with_behavior(StoreBehavior::SoftFail)
    }

    /// Create a mock whose `record` errors with `message`.
    pub fn failing(message: &str) -> Self {
        Self::with_behavior(StoreBehavior::Fail(message.to_string()))
    }

    /// Change the behavior at runtime.
    pub fn set_behavior(&self, behavior: StoreBehavior) {
        self.inner.write().unwrap().behavior = behavior;
    }

    // =========================================================================
    // Assertion Helpers
    // =========================================================================

    /// Number of `record` calls made.
    pub fn record_call_count(&self) -> usize {
        self.inner.read().unwrap().record_calls.len()
    }

    /// Every donation passed to `record`.
    pub fn record_calls(&self) -> Vec<NewDonation> {
        self.inner.read().unwrap().record_calls.clone()
    }

    /// The most recent donation passed to `record`.
    pub fn last_record_call(&self) -> Option<NewDonation> {
        self.inner.read().unwrap().record_calls.last().cloned()
    }

    /// Arguments of every `list` call.
    pub fn list_calls(&self) -> Vec<(u32, u32, SortKey)> {
        self.inner.read().unwrap().list_calls.clone()
    }

    /// Donations actually stored.
    pub fn records(&self) -> Vec<DonationRecord> {
        self.inner.read().unwrap().records.clone()
    }
}

#[async_trait]
impl DonationStore for MockStore {
    async fn record(&self, donation: NewDonation) -> StoreResult<Option<DonationRecord>> {
        let mut inner = self.inner.write().unwrap();
        inner.record_calls.push(donation.clone());

        match inner.behavior.clone() {
            StoreBehavior::Store { currency } => {
                let record = DonationRecord {
                    id: inner.next_id,
                    donor_address: donation.donor_address,
                    amount_usd: donation.amount_usd,
                    tokens_minted: 0,
                    name: donation.name,
                    message: donation.message,
                    transaction_signature: donation.transaction_signature,
                    currency,
                    created_at: Some(Utc::now()),
                };
                inner.next_id += 1;
                inner.records.push(record.clone());
                Ok(Some(record))
            }
            StoreBehavior::SoftFail => Ok(None),
            StoreBehavior::Fail(message) => Err(StoreError::Other(message)),
        }
    }

    async fn list(&self, page: u32, limit: u32, sort: SortKey) -> StoreResult<DonationPage> {
        let mut inner = self.inner.write().unwrap();
        inner.list_calls.push((page, limit, sort));
        if let StoreBehavior::Fail(message) = &inner.behavior {
            return Err(StoreError::Other(message.clone()));
        }

        let mut records = inner.records.clone();
        match sort {
            SortKey::Recent => records.reverse(),
            SortKey::Top => records.sort_by(|a, b| b.amount_usd.total_cmp(&a.amount_usd)),
        }
        let skip = page.saturating_sub(1) as usize * limit as usize;
        Ok(DonationPage {
            total: records.len() as u64,
            records: records.into_iter().skip(skip).take(limit as usize).collect(),
        })
    }

    async fn stats(&self) -> StoreResult<DonationStats> {
        let inner = self.inner.read().unwrap();
        Ok(DonationStats {
            count: inner.records.len() as u64,
            total_amount: inner.records.iter().map(|r| r.amount_usd).sum(),
            total_tokens: inner.records.iter().map(|r| r.tokens_minted).sum(),
        })
    }
}
