//! CLI configuration.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tipjar_ops::DonationConfig;
use tipjar_store::LauncherConfig;
use tipjar_x402::{DiscoveryConfig, GateConfig};

use crate::error::{CliError, CliResult};

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
    })
}

/// Expand environment variables in a string.
/// Supports `${VAR_NAME}` syntax; unset variables are left as written.
pub fn expand_env_vars(input: &str) -> String {
    env_var_pattern()
        .replace_all(input, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
        })
        .to_string()
}

/// Expand an optional setting. A value that still references an unset
/// variable, or expands to nothing, counts as unset.
fn expand_setting(value: Option<String>) -> Option<String> {
    let expanded = expand_env_vars(&value?);
    if expanded.trim().is_empty() || env_var_pattern().is_match(&expanded) {
        None
    } else {
        Some(expanded)
    }
}

/// CLI configuration loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Payment gate configuration.
    pub gate: GateConfig,
    /// Donation action configuration.
    pub donation: DonationConfig,
    /// Launcher store configuration.
    pub launcher: LauncherConfig,
    /// Discovery document configuration.
    pub discovery: DiscoveryConfig,
    /// Payment receiver settings.
    pub payment: PaymentConfig,
}

/// Where payments are received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Wallet receiving donations.
    pub resource_wallet: Option<String>,
}

impl CliConfig {
    /// Load configuration from a file.
    /// Environment variables in `${VAR}` format are expanded in launcher
    /// settings and the resource wallet.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;

        let launcher = &mut config.launcher;
        launcher.api_url = expand_setting(launcher.api_url.take());
        launcher.api_key = expand_setting(launcher.api_key.take());
        launcher.token_mint = expand_setting(launcher.token_mint.take());
        config.payment.resource_wallet = expand_setting(config.payment.resource_wallet.take());

        config.validate()?;
        Ok(config)
    }

    /// Check values that would make every request fail.
    pub fn validate(&self) -> CliResult<()> {
        if !self.donation.min_amount.is_finite() || self.donation.min_amount <= 0.0 {
            return Err(CliError::config(format!(
                "donation.min_amount must be positive, got {}",
                self.donation.min_amount
            )));
        }
        if self.gate.header_name.trim().is_empty() {
            return Err(CliError::config("gate.header_name must not be empty"));
        }
        Ok(())
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Get the default base directory for tipjar configuration.
pub fn default_base_dir() -> PathBuf {
    directories::ProjectDirs::from("io", "tipjar", "tipjar")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".tipjar"))
}

/// Get the default config file path.
pub fn default_config_path() -> PathBuf {
    default_base_dir().join("config.toml")
}

/// Mask a secret-ish value as `first8...last8`.
///
/// Values of 8 characters or fewer show in full on both sides.
pub fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let edge = chars.len().min(8);
    let head: String = chars[..edge].iter().collect();
    let tail: String = chars[chars.len() - edge..].iter().collect();
    format!("{}...{}", head, tail)
}
