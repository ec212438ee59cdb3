//! Command-line interface for the tipjar donation protocol.
//!
//! This crate provides the `tipjar` binary for operating a tipjar deployment.
//! It includes commands for:
//!
//! - **Proofs**: Encode and decode `X-PAYMENT-RESPONSE` header values
//! - **Donations**: Submit a donation through the gate and record it
//! - **Discovery**: Print the `/.well-known/x402.json` document
//! - **Stats**: Show aggregate donation figures from the launcher
//! - **Configuration**: Show the masked configuration or write a default one
//!
//! # Quick Start
//!
//! ```bash
//! # Write a starter configuration
//! tipjar config init
//!
//! # Donate $25 with a message
//! tipjar donate --amount 25 --payer 7xKX... --name Alice --message "gm"
//!
//! # Show aggregate figures
//! tipjar stats
//! ```
//!
//! # Output Formats
//!
//! All commands support `--format` for output control:
//!
//! - `human` (default): Human-readable with colors
//! - `json`: Machine-readable JSON
//!
//! # Configuration
//!
//! Configuration is loaded from the platform config directory
//! (`tipjar/config.toml`). Override with `--config`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod output;

// Re-export main types
pub use cli::{Cli, Commands, ConfigCommand, OutputFormatArg, ProofCommand};
pub use config::CliConfig;
pub use context::TipjarContext;
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, Render};
