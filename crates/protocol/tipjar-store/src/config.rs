//! Launcher store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default HTTP timeout for launcher requests (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the launcher donation API.
///
/// Built once at composition time and handed to [`crate::LauncherStore`];
/// components never read the environment themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Base URL of the launcher API. Unset disables recording.
    pub api_url: Option<String>,

    /// API key sent as `X-API-Key`.
    pub api_key: Option<String>,

    /// Mint of the project token donations are recorded against.
    pub token_mint: Option<String>,

    /// Project tokens minted per donated dollar.
    pub dollar_to_token_ratio: u64,

    /// HTTP timeout in seconds.
    pub timeout_secs: u64,

    /// Propagate transport and HTTP failures as errors instead of soft-failing.
    pub strict: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            token_mint: None,
            dollar_to_token_ratio: 1000,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            strict: false,
        }
    }
}

impl LauncherConfig {
    /// Create a configuration for the given launcher and token mint.
    pub fn new(api_url: &str, token_mint: &str) -> Self {
        Self {
            api_url: Some(api_url.to_string()),
            token_mint: Some(token_mint.to_string()),
            ..Default::default()
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Whether both the URL and the token mint are set.
    pub fn is_configured(&self) -> bool {
        self.endpoint().is_some()
    }

    /// The normalized base URL and token mint, when both are set.
    pub fn endpoint(&self) -> Option<(String, &str)> {
        let url = self.api_url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        let mint = self.token_mint.as_deref().map(str::trim).filter(|m| !m.is_empty())?;
        Some((url.trim_end_matches('/').to_string(), mint))
    }

    /// HTTP timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Project tokens minted for a donation, rounded down.
    pub fn tokens_for(&self, amount_usd: f64) -> u64 {
        (amount_usd * self.dollar_to_token_ratio as f64).floor().max(0.0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LauncherConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.dollar_to_token_ratio, 1000);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.strict);
    }

    #[test]
    fn test_endpoint_normalization() {
        let config = LauncherConfig::new("https://launcher.example.com/", "Mint111");
        let (url, mint) = config.endpoint().unwrap();
        assert_eq!(url, "https://launcher.example.com");
        assert_eq!(mint, "Mint111");
    }

    #[test]
    fn test_missing_mint_is_unconfigured() {
        let config = LauncherConfig {
            api_url: Some("https://launcher.example.com".into()),
            token_mint: Some("  ".into()),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn test_tokens_for() {
        let config = LauncherConfig::default();
        assert_eq!(config.tokens_for(25.5), 25_500);
        assert_eq!(config.tokens_for(0.0019), 1);
        assert_eq!(config.tokens_for(0.0), 0);
    }
}
