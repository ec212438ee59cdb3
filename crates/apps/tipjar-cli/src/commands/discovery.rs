//! Discovery document command.

use tipjar_x402::DiscoveryDocument;

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{DiscoveryOutput, OutputFormat, Render};

/// Execute the discovery command.
pub fn discovery(config: &CliConfig, format: OutputFormat) -> CliResult<String> {
    let output = DiscoveryOutput {
        document: DiscoveryDocument::build(&config.discovery),
    };
    Ok(output.render(format))
}
