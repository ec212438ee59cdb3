//! Donation action configuration.

use serde::{Deserialize, Serialize};

/// Smallest accepted donation, in USD.
pub const DEFAULT_MIN_AMOUNT: f64 = 0.01;

/// Currency reported when the store does not echo one.
pub const DEFAULT_CURRENCY: &str = "USDC";

/// Composition-time settings for [`crate::DonationAction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonationConfig {
    /// Minimum declared amount.
    pub min_amount: f64,

    /// Currency used in acknowledgements when the store reports none.
    pub default_currency: String,
}

impl Default for DonationConfig {
    fn default() -> Self {
        Self {
            min_amount: DEFAULT_MIN_AMOUNT,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}
