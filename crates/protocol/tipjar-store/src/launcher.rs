//! Launcher API client.
//!
//! Records donations in the launcher's central database. Unless the
//! configuration is `strict`, every failure is logged and reported as a soft
//! failure: `Ok(None)` from `record`, an empty page from `list`, zeroed
//! figures from `stats`.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::LauncherConfig;
use crate::error::{StoreError, StoreResult};
use crate::traits::DonationStore;
use crate::types::{DonationPage, DonationRecord, DonationStats, NewDonation, SortKey};

/// Header carrying the launcher API key.
pub const HEADER_API_KEY: &str = "X-API-Key";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoreDonationRequest<'a> {
    token_mint: &'a str,
    donor_address: &'a str,
    donor_name: Option<&'a str>,
    amount_usd: f64,
    tokens_minted: u64,
    message: Option<&'a str>,
    transaction_signature: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreDonationResponse {
    #[serde(default)]
    donation_id: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct DonationsResponse {
    #[serde(default)]
    donations: Vec<DonationRecord>,
    #[serde(default)]
    pagination: Option<PaginationInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct PaginationInfo {
    #[serde(default)]
    total: u64,
}

#[derive(Debug, Default, Deserialize)]
struct StatsResponse {
    #[serde(default)]
    stats: Option<LauncherStats>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LauncherStats {
    #[serde(default)]
    total_donations: u64,
    #[serde(default)]
    total_amount: f64,
    #[serde(default)]
    total_tokens: u64,
}

/// Donation store backed by the launcher HTTP API.
#[derive(Clone)]
pub struct LauncherStore {
    client: Client,
    config: LauncherConfig,
}

impl LauncherStore {
    /// Create a new launcher client.
    pub fn new(config: LauncherConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| StoreError::Config(format!("failed to create HTTP client: {}", e)))?;

        if !config.is_configured() {
            warn!("Launcher API URL or token mint not configured - donations will not be recorded");
        }

        Ok(Self { client, config })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.header(HEADER_API_KEY, key),
            None => request,
        }
    }

    /// Turn a hard failure into a soft one unless running strict.
    fn soften<T>(&self, op: &str, err: StoreError, fallback: T) -> StoreResult<T> {
        if self.config.strict {
            return Err(err);
        }
        error!(op = op, error = %err, "Launcher request failed");
        Ok(fallback)
    }

    async fn send_json<T: for<'de> Deserialize<'de>>(
        &self,
        request: RequestBuilder,
    ) -> StoreResult<T> {
        let response = self.with_key(request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn try_record(
        &self,
        url: &str,
        mint: &str,
        donation: &NewDonation,
    ) -> StoreResult<DonationRecord> {
        let tokens_minted = self.config.tokens_for(donation.amount_usd);
        let body = StoreDonationRequest {
            token_mint: mint,
            donor_address: &donation.donor_address,
            donor_name: donation.name.as_deref(),
            amount_usd: donation.amount_usd,
            tokens_minted,
            message: donation.message.as_deref(),
            transaction_signature: donation.transaction_signature.as_deref(),
        };

        let endpoint = format!("{}/api/donations", url);
        debug!(url = %endpoint, donor = %donation.donor_address, "Recording donation");

        let response: StoreDonationResponse = self
            .send_json(self.client.post(&endpoint).json(&body))
            .await?;

        Ok(DonationRecord::from_new(
            response.donation_id.unwrap_or(0),
            donation,
            tokens_minted,
        ))
    }
}

#[async_trait]
impl DonationStore for LauncherStore {
    async fn record(&self, donation: NewDonation) -> StoreResult<Option<DonationRecord>> {
        let Some((url, mint)) = self.config.endpoint() else {
            error!("Cannot store donation - missing launcher API URL or token mint");
            return Ok(None);
        };

        match self.try_record(&url, mint, &donation).await {
            Ok(record) => {
                info!(
                    id = record.id,
                    amount_usd = record.amount_usd,
                    tokens_minted = record.tokens_minted,
                    "Donation recorded"
                );
                Ok(Some(record))
            }
            Err(e) => self.soften("record", e, None),
        }
    }

    async fn list(&self, page: u32, limit: u32, sort: SortKey) -> StoreResult<DonationPage> {
        let Some((url, mint)) = self.config.endpoint() else {
            error!("Cannot fetch donations - missing launcher API URL or token mint");
            return Ok(DonationPage::default());
        };

        let endpoint = format!("{}/api/donations/{}", url, mint);
        let request = self.client.get(&endpoint).query(&[
            ("page", page.to_string()),
            ("limit", limit.to_string()),
            ("sort", sort.as_str().to_string()),
        ]);
        debug!(url = %endpoint, page, limit, sort = sort.as_str(), "Fetching donations");

        match self.send_json::<DonationsResponse>(request).await {
            Ok(response) => Ok(DonationPage {
                total: response.pagination.map(|p| p.total).unwrap_or_default(),
                records: response.donations,
            }),
            Err(e) => self.soften("list", e, DonationPage::default()),
        }
    }

    async fn stats(&self) -> StoreResult<DonationStats> {
        let Some((url, mint)) = self.config.endpoint() else {
            error!("Cannot fetch stats - missing launcher API URL or token mint");
            return Ok(DonationStats::default());
        };

        let endpoint = format!("{}/api/donations/{}", url, mint);

        match self.send_json::<StatsResponse>(self.client.get(&endpoint)).await {
            Ok(response) => {
                let stats = response.stats.unwrap_or_default();
                Ok(DonationStats {
                    count: stats.total_donations,
                    total_amount: stats.total_amount,
                    total_tokens: stats.total_tokens,
                })
            }
            Err(e) => self.soften("stats", e, DonationStats::default()),
        }
    }
}

impl std::fmt::Debug for LauncherStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LauncherStore")
            .field("api_url", &self.config.api_url)
            .field("token_mint", &self.config.token_mint)
            .finish()
    }
}
