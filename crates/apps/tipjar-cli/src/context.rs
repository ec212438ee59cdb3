//! Tipjar context for CLI operations.

use std::sync::Arc;

use tipjar_ops::{DonationAction, DonationEndpoint};
use tipjar_store::{DonationStore, LauncherStore};
use tipjar_x402::{PaymentVerifier, PriceGate};
use tracing::debug;

use crate::config::CliConfig;
use crate::error::CliResult;

/// Context containing all initialized components.
pub struct TipjarContext {
    /// Donation endpoints behind the gate.
    pub endpoint: DonationEndpoint,
    /// Record store behind the endpoint.
    pub store: Arc<dyn DonationStore>,
    /// Configuration.
    pub config: CliConfig,
}

impl TipjarContext {
    /// Build the context against the configured launcher.
    pub fn new(config: CliConfig) -> CliResult<Self> {
        let store: Arc<dyn DonationStore> = Arc::new(LauncherStore::new(config.launcher.clone())?);
        debug!(
            launcher_configured = config.launcher.is_configured(),
            "Initialized launcher store"
        );
        Ok(Self::with_store(config, store))
    }

    /// Build the context with an explicit store.
    pub fn with_store(config: CliConfig, store: Arc<dyn DonationStore>) -> Self {
        let gate = PriceGate::new(config.gate.clone(), PaymentVerifier::accept_all());
        let action = DonationAction::new(store.clone(), config.donation.clone());

        Self {
            endpoint: DonationEndpoint::new(gate, action),
            store,
            config,
        }
    }
}
