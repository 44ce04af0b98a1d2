//! # Invoice Dispatch CLI
//!
//! Command-line entry point.
//!
//! Provides:
//! - Configuration loading and validation
//! - One dispatch run per invocation
//! - Store maintenance (seed / reset) and re-submission of failed invoices

mod cli;
mod commands;
mod error;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_pipeline, run_resend, run_reset, run_seed, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    observability::init_with_config(observability_config(&cli))?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Invoice dispatch CLI starting"
    );

    let result = match &cli.command {
        Commands::Run(args) => run_pipeline(args).await,
        Commands::Resend(args) => run_resend(args).await,
        Commands::Validate(args) => run_validate(args),
        Commands::Reset(args) => run_reset(args).await,
        Commands::Seed(args) => run_seed(args),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// Map CLI verbosity flags onto the observability configuration
fn observability_config(cli: &Cli) -> ObservabilityConfig {
    let (default_log_level, force_level) = if cli.quiet {
        ("warn", true)
    } else {
        let level = match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        (level, false)
    };

    ObservabilityConfig {
        log_format: cli.log_format.into(),
        metrics_port: None,
        default_log_level: default_log_level.to_string(),
        force_level,
    }
}
