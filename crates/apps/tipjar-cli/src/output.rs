//! Output formatting for CLI.

use colored::Colorize;
use serde::Serialize;
use tipjar_ops::DonationAck;
use tipjar_store::DonationStats;
use tipjar_x402::{discovery::DISCOVERY_PATH, DiscoveryDocument};

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Trait for renderable output.
pub trait Render {
    /// Render as human-readable string.
    fn render_human(&self) -> String;

    /// Render as JSON string.
    fn render_json(&self) -> String;

    /// Render in the specified format.
    fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Human => self.render_human(),
            OutputFormat::Json => self.render_json(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

// =============================================================================
// Output Types
// =============================================================================

/// Output for `proof encode`.
#[derive(Debug, Serialize)]
pub struct ProofEncodeOutput {
    pub header: String,
    pub header_value: String,
}

impl Render for ProofEncodeOutput {
    fn render_human(&self) -> String {
        format!("{}: {}", self.header.bold(), self.header_value)
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for `proof decode`.
#[derive(Debug, Serialize)]
pub struct ProofDecodeOutput {
    pub payer: String,
    pub transaction: Option<String>,
}

impl Render for ProofDecodeOutput {
    fn render_human(&self) -> String {
        [
            format!("{} {}", "Payer:".bold(), self.payer),
            format!(
                "{} {}",
                "Transaction:".bold(),
                or_dash(self.transaction.as_deref())
            ),
        ]
        .join("\n")
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for `donate`.
#[derive(Debug, Serialize)]
pub struct DonateOutput {
    pub message: String,
    pub data: DonationAck,
}

impl Render for DonateOutput {
    fn render_human(&self) -> String {
        let mut lines = vec![
            format!("{}", self.message.green().bold()),
            format!("{} {}", "Donator:".bold(), self.data.donator),
            format!(
                "{} ${} ({})",
                "Amount:".bold(),
                self.data.amount_usd,
                self.data.currency
            ),
            format!(
                "{} {}",
                "Transaction:".bold(),
                or_dash(self.data.transaction_signature.as_deref())
            ),
        ];
        if let Some(message) = &self.data.message {
            lines.push(format!("{} \"{}\"", "Message:".bold(), message));
        }
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        to_json(&serde_json::json!({
            "success": true,
            "message": self.message,
            "data": self.data,
        }))
    }
}

/// Output for `discovery`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct DiscoveryOutput {
    pub document: DiscoveryDocument,
}

impl Render for DiscoveryOutput {
    fn render_human(&self) -> String {
        let doc = &self.document;
        let mut lines = vec![
            format!("{} (v{}) {}", doc.name.bold(), doc.version, DISCOVERY_PATH.dimmed()),
            format!("{} {}", "Facilitator:".bold(), doc.facilitator),
            format!("{}", "Resources:".bold()),
        ];
        for resource in &doc.resources {
            lines.push(format!(
                "  {:<6} {:<16} {:>12} {}",
                resource.method,
                resource.path,
                resource.price,
                resource.currency.dimmed()
            ));
        }
        lines.join("\n")
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for `config show`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOutput {
    pub config_path: String,
    pub facilitator_url: String,
    pub network: String,
    pub resource_wallet: String,
    pub token_mint: String,
    pub launcher_api_url: String,
    pub launcher_api_key: String,
    pub proof_header: String,
    pub min_amount: f64,
}

impl Render for ConfigOutput {
    fn render_human(&self) -> String {
        [
            format!("{} {}", "Config file:".bold(), self.config_path),
            format!("{} {}", "Facilitator:".bold(), self.facilitator_url),
            format!("{} {}", "Network:".bold(), self.network),
            format!("{} {}", "Resource wallet:".bold(), self.resource_wallet),
            format!("{} {}", "Token mint:".bold(), self.token_mint),
            format!("{} {}", "Launcher API:".bold(), self.launcher_api_url),
            format!("{} {}", "Launcher key:".bold(), self.launcher_api_key),
            format!("{} {}", "Proof header:".bold(), self.proof_header),
            format!("{} ${}", "Minimum donation:".bold(), self.min_amount),
        ]
        .join("\n")
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for `config init`.
#[derive(Debug, Serialize)]
pub struct ConfigInitOutput {
    pub config_path: String,
}

impl Render for ConfigInitOutput {
    fn render_human(&self) -> String {
        format!(
            "{} {}",
            "Configuration saved to:".green(),
            self.config_path
        )
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}

/// Output for `stats`.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct StatsOutput {
    pub stats: DonationStats,
}

impl Render for StatsOutput {
    fn render_human(&self) -> String {
        [
            format!("{} {}", "Donations:".bold(), self.stats.count),
            format!("{} ${}", "Total amount:".bold(), self.stats.total_amount),
            format!("{} {}", "Tokens minted:".bold(), self.stats.total_tokens),
        ]
        .join("\n")
    }

    fn render_json(&self) -> String {
        to_json(self)
    }
}
