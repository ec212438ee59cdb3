//! Donation record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A donation to be recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDonation {
    /// Payer's account address.
    pub donor_address: String,

    /// Donated amount in USD.
    pub amount_usd: f64,

    /// Optional donor display name.
    pub name: Option<String>,

    /// Optional message for the community board.
    pub message: Option<String>,

    /// Settlement transaction reference, if known.
    pub transaction_signature: Option<String>,
}

/// A donation as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRecord {
    /// Store-assigned identifier (0 when the store does not report one).
    #[serde(default)]
    pub id: u64,

    #[serde(alias = "donator_address")]
    pub donor_address: String,

    pub amount_usd: f64,

    /// Project tokens minted for the donation.
    #[serde(default)]
    pub tokens_minted: u64,

    #[serde(default, alias = "donor_name")]
    pub name: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub transaction_signature: Option<String>,

    /// Currency the store settled the donation in, when it reports one.
    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl DonationRecord {
    /// Build a record from a submitted donation.
    pub fn from_new(id: u64, donation: &NewDonation, tokens_minted: u64) -> Self {
        Self {
            id,
            donor_address: donation.donor_address.clone(),
            amount_usd: donation.amount_usd,
            tokens_minted,
            name: donation.name.clone(),
            message: donation.message.clone(),
            transaction_signature: donation.transaction_signature.clone(),
            currency: None,
            created_at: Some(Utc::now()),
        }
    }
}

/// Ordering requested from [`crate::DonationStore::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest first.
    #[default]
    Recent,
    /// Largest amount first.
    Top,
}

impl SortKey {
    /// Query-string value understood by the launcher.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Top => "top",
        }
    }
}

/// One page of recorded donations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DonationPage {
    pub records: Vec<DonationRecord>,
    /// Total number of records across all pages.
    pub total: u64,
}

/// Aggregate donation figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationStats {
    pub count: u64,
    pub total_amount: f64,
    pub total_tokens: u64,
}
