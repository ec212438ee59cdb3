//! Priced actions.
//!
//! An [`ActionDispatcher`] receives the gate's verified payer context plus
//! validated business parameters and performs exactly one external effect.
//! [`DonationAction`] records a donation and acknowledges it.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tipjar_store::{DonationStore, NewDonation};
use tipjar_x402::PricedRequest;
use tracing::{info, warn};

use crate::config::DonationConfig;
use crate::error::{OpsError, OpsResult};

/// Handler contract for an action behind the price gate.
#[async_trait]
pub trait ActionDispatcher: Send + Sync {
    /// Business parameters of the action.
    type Params: Send;
    /// Acknowledgement returned on success.
    type Output: Send;

    /// Perform the action for an authorized request.
    async fn handle(&self, request: PricedRequest, params: Self::Params) -> OpsResult<Self::Output>;
}

/// Optional donor details accompanying a donation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonationParams {
    pub name: Option<String>,
    pub message: Option<String>,
}

/// Acknowledgement of an accepted donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationAck {
    /// Payer identity.
    pub donator: String,

    /// Declared amount.
    pub amount_usd: f64,

    /// Currency echoed by the store, or the configured default.
    pub currency: String,

    pub transaction_signature: Option<String>,

    pub name: Option<String>,

    pub message: Option<String>,

    /// Human-readable confirmation.
    #[serde(skip)]
    pub confirmation: String,
}

/// Records a donation for an authorized request.
#[derive(Clone)]
pub struct DonationAction {
    store: Arc<dyn DonationStore>,
    config: DonationConfig,
}

impl DonationAction {
    /// Create the action with its store collaborator and configuration.
    pub fn new(store: Arc<dyn DonationStore>, config: DonationConfig) -> Self {
        Self { store, config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &DonationConfig {
        &self.config
    }

    /// Check the declared amount against the configured minimum.
    fn validate_amount(&self, amount: Option<f64>) -> OpsResult<f64> {
        match amount {
            Some(a) if a.is_finite() && a >= self.config.min_amount => Ok(a),
            _ => Err(OpsError::InvalidAmount {
                min: self.config.min_amount,
            }),
        }
    }
}

#[async_trait]
impl ActionDispatcher for DonationAction {
    type Params = DonationParams;
    type Output = DonationAck;

    async fn handle(&self, request: PricedRequest, params: DonationParams) -> OpsResult<DonationAck> {
        let amount = self.validate_amount(request.declared_amount())?;
        let name = non_empty(params.name);
        let message = non_empty(params.message);
        let donator = request.payer().as_str().to_string();
        let transaction_signature = request.transaction_reference().map(str::to_string);

        let donation = NewDonation {
            donor_address: donator.clone(),
            amount_usd: amount,
            name: name.clone(),
            message: message.clone(),
            transaction_signature: transaction_signature.clone(),
        };

        // Ok(None) is a soft failure and still acknowledges the donation: the
        // payment has already been accepted. Only a store error aborts.
        let stored = self.store.record(donation).await.map_err(|e| {
            warn!(donator = %donator, amount_usd = amount, error = %e, "Recording donation failed");
            OpsError::RecordingFailed {
                message: e.to_string(),
                amount,
            }
        })?;

        let currency = match stored {
            Some(record) => record
                .currency
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| self.config.default_currency.clone()),
            None => {
                warn!(donator = %donator, "Donation not recorded by store; acknowledging anyway");
                self.config.default_currency.clone()
            }
        };

        info!(
            donator = %donator,
            amount_usd = amount,
            currency = %currency,
            transaction = ?transaction_signature,
            "Donation accepted"
        );

        Ok(DonationAck {
            confirmation: confirmation(name.as_deref(), amount),
            donator,
            amount_usd: amount,
            currency,
            transaction_signature,
            name,
            message,
        })
    }
}

impl std::fmt::Debug for DonationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DonationAction")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Confirmation text shown to the donor.
pub fn confirmation(name: Option<&str>, amount: f64) -> String {
    match name {
        Some(name) => format!("Thank you, {}, for your ${} donation!", name, amount),
        None => format!("Thank you for your ${} donation!", amount),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
