//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Tipjar CLI.
#[derive(Parser, Debug)]
#[command(name = "tipjar")]
#[command(author = "Tipjar Contributors")]
#[command(version)]
#[command(about = "Command-line interface for the tipjar donation protocol")]
#[command(
    long_about = "Tipjar accepts x402-paid donations and records them with the launcher.\n\nRun 'tipjar config init' to write a starter configuration."
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (human or json).
    #[arg(short, long, global = true, default_value = "human")]
    pub format: OutputFormatArg,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Output format argument for clap.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormatArg {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode or decode payment proof headers.
    #[command(subcommand)]
    Proof(ProofCommand),

    /// Submit a donation through the payment gate.
    ///
    /// Runs the full gate and donation pipeline locally and records the
    /// donation with the configured launcher.
    Donate {
        /// Amount in USD.
        #[arg(short, long, allow_hyphen_values = true)]
        amount: f64,

        /// Donor name attached to the donation record.
        #[arg(short, long)]
        name: Option<String>,

        /// Message attached to the donation record.
        #[arg(short, long)]
        message: Option<String>,

        /// Raw proof header value (base64 JSON).
        #[arg(long, conflicts_with_all = ["payer", "transaction"])]
        proof: Option<String>,

        /// Payer address to build a proof for.
        #[arg(long)]
        payer: Option<String>,

        /// Transaction signature to include in the built proof.
        #[arg(short, long, requires = "payer")]
        transaction: Option<String>,

        /// Use a fixed donation tier instead of a custom amount.
        #[arg(long, conflicts_with_all = ["name", "message"])]
        fixed: bool,
    },

    /// Print the /.well-known/x402.json discovery document.
    Discovery,

    /// Inspect or create the configuration file.
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Show aggregate donation figures.
    Stats,
}

/// `proof` subcommands.
#[derive(Subcommand, Debug)]
pub enum ProofCommand {
    /// Build a proof header value.
    Encode {
        /// Payer address.
        payer: String,

        /// Transaction signature.
        #[arg(short, long)]
        transaction: Option<String>,
    },

    /// Decode a proof header value.
    Decode {
        /// Header value (base64 JSON).
        header: String,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration with sensitive values masked.
    Show,

    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}
