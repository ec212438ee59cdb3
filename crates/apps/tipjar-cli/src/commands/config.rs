//! Configuration commands.

use std::path::Path;

use crate::config::{mask, CliConfig};
use crate::error::{CliError, CliResult};
use crate::output::{ConfigInitOutput, ConfigOutput, OutputFormat, Render};

const NOT_SET: &str = "Not set";

fn masked(value: Option<&str>) -> String {
    value.map(mask).unwrap_or_else(|| NOT_SET.to_string())
}

/// Execute the `config show` command.
pub fn config_show(config: &CliConfig, path: &Path, format: OutputFormat) -> CliResult<String> {
    let output = ConfigOutput {
        config_path: path.display().to_string(),
        facilitator_url: config.discovery.facilitator_url.clone(),
        network: config.discovery.network.clone(),
        resource_wallet: masked(config.payment.resource_wallet.as_deref()),
        token_mint: masked(config.launcher.token_mint.as_deref()),
        launcher_api_url: config
            .launcher
            .api_url
            .clone()
            .unwrap_or_else(|| NOT_SET.to_string()),
        launcher_api_key: masked(config.launcher.api_key.as_deref()),
        proof_header: config.gate.header_name.clone(),
        min_amount: config.donation.min_amount,
    };
    Ok(output.render(format))
}

/// Execute the `config init` command.
pub fn config_init(path: &Path, force: bool, format: OutputFormat) -> CliResult<String> {
    if path.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        )));
    }
    CliConfig::default().save(path)?;

    let output = ConfigInitOutput {
        config_path: path.display().to_string(),
    };
    Ok(output.render(format))
}
