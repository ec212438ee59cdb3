//! x402 discovery document (`/.well-known/x402.json`).
//!
//! Advertises the priced endpoints, their prices in smallest token units, and
//! the facilitator clients should settle through.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Path the discovery document is conventionally served from.
pub const DISCOVERY_PATH: &str = "/.well-known/x402.json";

/// Fixed-price donation tiers, in USD.
pub const DONATION_TIERS_USD: [u64; 3] = [1, 5, 10];

/// Minimum amount for a custom donation, in USD.
pub const MIN_CUSTOM_DONATION_USD: f64 = 0.01;

/// Token accepted for donations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationToken {
    /// Mint address of the token.
    pub address: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display name.
    pub name: String,
    /// Decimal places of the smallest unit.
    pub decimals: u32,
}

impl Default for DonationToken {
    fn default() -> Self {
        Self {
            // USDC on Solana mainnet
            address: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string(),
            symbol: "USDC".to_string(),
            name: "USD Coin".to_string(),
            decimals: 6,
        }
    }
}

/// Inputs for building the discovery document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Name of the project token rewarded for donations.
    pub token_name: String,
    /// Symbol of the project token.
    pub token_symbol: String,
    /// Project tokens granted per donated dollar.
    pub dollar_to_token_ratio: u64,
    /// Payment network identifier.
    pub network: String,
    /// Facilitator URL.
    pub facilitator_url: String,
    /// Optional project image.
    pub project_image_url: Option<String>,
    /// Token accepted for donations.
    pub donation_token: DonationToken,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            token_name: "Unknown Token".to_string(),
            token_symbol: "TOKEN".to_string(),
            dollar_to_token_ratio: 1000,
            network: "solana-devnet".to_string(),
            facilitator_url: "https://facilitator.payai.network".to_string(),
            project_image_url: None,
            donation_token: DonationToken::default(),
        }
    }
}

/// A single advertised resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEntry {
    /// Route path.
    pub path: String,
    /// HTTP method.
    pub method: String,
    /// Price in smallest token units.
    pub price: u64,
    /// Currency symbol.
    pub currency: String,
    /// Payment network.
    pub network: String,
    /// Human-readable description.
    pub description: String,
    /// Request parameters, name → description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, String>>,
}

/// The discovery document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryDocument {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub version: String,
    pub facilitator: String,
    pub resources: Vec<ResourceEntry>,
}

impl DiscoveryDocument {
    /// Build the document for the donation endpoints.
    pub fn build(config: &DiscoveryConfig) -> Self {
        let token = &config.donation_token;
        let entry = |path: &str, method: &str, usd: f64, description: String| ResourceEntry {
            path: path.to_string(),
            method: method.to_string(),
            price: to_smallest_units(usd, token.decimals),
            currency: token.symbol.clone(),
            network: config.network.clone(),
            description,
            parameters: None,
        };

        let mut resources: Vec<ResourceEntry> = DONATION_TIERS_USD
            .iter()
            .map(|&usd| {
                entry(
                    &format!("/donate/{}", usd),
                    "POST",
                    usd as f64,
                    format!(
                        "Donate ${} {} and receive {} {} tokens",
                        usd,
                        token.symbol,
                        config.dollar_to_token_ratio * usd,
                        config.token_symbol
                    ),
                )
            })
            .collect();

        let mut write_message = entry(
            "/write-message",
            "POST",
            MIN_CUSTOM_DONATION_USD,
            "Make a custom donation (minimum $0.01) with an optional message and your name".to_string(),
        );
        write_message.parameters = Some(params(&[
            ("amount", "number (USD, minimum 0.01)"),
            ("name", "string (optional)"),
            ("message", "string (optional)"),
        ]));
        resources.push(write_message);

        Self {
            name: format!("{} ({})", config.token_name, config.token_symbol),
            description: format!(
                "Support {} by making a donation and receive {} tokens in return. All donations are recorded on the blockchain.",
                config.token_name, config.token_symbol
            ),
            image: config.project_image_url.clone(),
            version: "1.0.0".to_string(),
            facilitator: config.facilitator_url.clone(),
            resources,
        }
    }

    /// Look up a resource by path.
    pub fn resource(&self, path: &str) -> Option<&ResourceEntry> {
        self.resources.iter().find(|r| r.path == path)
    }
}

/// Convert a USD amount to the token's smallest unit, rounding to nearest.
pub fn to_smallest_units(usd: f64, decimals: u32) -> u64 {
    (usd * 10f64.powi(decimals as i32)).round() as u64
}

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
