//! Donation stats command.

use tipjar_store::DonationStore;

use crate::context::TipjarContext;
use crate::error::CliResult;
use crate::output::{OutputFormat, Render, StatsOutput};

/// Execute the stats command.
pub async fn stats(ctx: &TipjarContext, format: OutputFormat) -> CliResult<String> {
    let stats = ctx.store.stats().await?;
    Ok(StatsOutput { stats }.render(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use std::sync::Arc;
    use tipjar_store::NewDonation;
    use tipjar_test_utils::MockStore;

    #[tokio::test]
    async fn test_stats() {
        let store = MockStore::new();
        for amount in [1.0, 4.0] {
            store
                .record(NewDonation {
                    donor_address: "payer".to_string(),
                    amount_usd: amount,
                    name: None,
                    message: None,
                    transaction_signature: None,
                })
                .await
                .unwrap();
        }
        let ctx = TipjarContext::with_store(CliConfig::default(), Arc::new(store));

        let output = stats(&ctx, OutputFormat::Json).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 2);
        assert_eq!(value["totalAmount"], 5.0);
    }
}
