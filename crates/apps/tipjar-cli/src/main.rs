//! Tipjar CLI binary entry point.

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tipjar_cli::{
    cli::{Cli, Commands, ConfigCommand, ProofCommand},
    commands::{self, DonateArgs},
    config::{default_config_path, CliConfig},
    context::TipjarContext,
    error::{CliError, CliResult},
    output::OutputFormat,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging based on --verbose flag or RUST_LOG env var
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if cli.verbose || has_rust_log {
        let mut filter = EnvFilter::from_default_env();
        if cli.verbose {
            // Matches every tipjar_* crate target.
            if let Ok(directive) = "tipjar=debug".parse() {
                filter = filter.add_directive(directive);
            }
        }
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    if let Err(e) = run(cli).await {
        print_error(&e);
        std::process::exit(e.exit_code());
    }
}

/// Print a user-friendly error message with recovery hint.
fn print_error(e: &CliError) {
    eprintln!(
        "{} [{}]: {}",
        "Error".red().bold(),
        e.exit_code().to_string().yellow(),
        e
    );

    if let Some(suggestion) = e.suggestion() {
        eprintln!("{}: {}", "Hint".cyan(), suggestion);
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let format: OutputFormat = cli.format.into();
    let load_config = || CliConfig::load(&config_path);

    // Dispatch command
    let output = match cli.command {
        Commands::Proof(ProofCommand::Encode { payer, transaction }) => {
            commands::proof_encode(format, &payer, transaction.as_deref())?
        }

        Commands::Proof(ProofCommand::Decode { header }) => commands::proof_decode(format, &header)?,

        Commands::Donate {
            amount,
            name,
            message,
            proof,
            payer,
            transaction,
            fixed,
        } => {
            let ctx = TipjarContext::new(load_config()?)?;
            let args = DonateArgs {
                amount,
                name,
                message,
                proof,
                payer,
                transaction,
                fixed,
            };
            commands::donate(&ctx, format, args).await?
        }

        Commands::Discovery => commands::discovery(&load_config()?, format)?,

        Commands::Config(ConfigCommand::Show) => {
            commands::config_show(&load_config()?, &config_path, format)?
        }

        // Does not load the existing file, so a broken config can be replaced.
        Commands::Config(ConfigCommand::Init { force }) => {
            commands::config_init(&config_path, force, format)?
        }

        Commands::Stats => {
            let ctx = TipjarContext::new(load_config()?)?;
            commands::stats(&ctx, format).await?
        }
    };

    // Print output
    println!("{}", output);

    Ok(())
}
