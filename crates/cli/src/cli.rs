//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use contracts::Decimal;
use std::path::PathBuf;

/// Invoice Dispatch - sends low-value invoices to the accounting system
#[derive(Parser, Debug)]
#[command(
    name = "invoice-dispatch",
    author,
    version,
    about = "Low-value invoice dispatch pipeline",
    long_about = "Reads invoices from the configured record store, selects those below the\n\
                  low-value threshold and sends each one to the accounting sink.\n\n\
                  Failed invoices are reported (and optionally written out for `resend`);\n\
                  nothing is retried automatically."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "INVOICE_DISPATCH_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "INVOICE_DISPATCH_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch low-value invoices from the configured store
    Run(RunArgs),

    /// Re-submit invoices from a failures file
    Resend(ResendArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Delete every invoice in the configured store
    Reset(StoreArgs),

    /// Insert the configured seed invoices into the store
    Seed(StoreArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "config.toml",
        env = "INVOICE_DISPATCH_CONFIG"
    )]
    pub config: PathBuf,

    /// Override the low-value threshold from configuration
    #[arg(long, env = "INVOICE_DISPATCH_THRESHOLD")]
    pub threshold: Option<Decimal>,

    /// Select and print candidates without sending anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write failed invoices as JSON, for `resend`
    #[arg(long, env = "INVOICE_DISPATCH_FAILURES_OUT")]
    pub failures_out: Option<PathBuf>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "INVOICE_DISPATCH_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `resend` command
#[derive(Parser, Debug, Clone)]
pub struct ResendArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "config.toml",
        env = "INVOICE_DISPATCH_CONFIG"
    )]
    pub config: PathBuf,

    /// Failures file written by `run --failures-out`
    #[arg(long)]
    pub from: PathBuf,

    /// Write invoices that failed again as JSON
    #[arg(long, env = "INVOICE_DISPATCH_FAILURES_OUT")]
    pub failures_out: Option<PathBuf>,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for store maintenance commands
#[derive(Parser, Debug)]
pub struct StoreArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "config.toml",
        env = "INVOICE_DISPATCH_CONFIG"
    )]
    pub config: PathBuf,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_overrides() {
        let cli = Cli::try_parse_from([
            "invoice-dispatch",
            "-v",
            "run",
            "-c",
            "pipeline.toml",
            "--threshold",
            "42.50",
            "--failures-out",
            "failed.json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.config, PathBuf::from("pipeline.toml"));
                assert_eq!(args.threshold, Some(Decimal::new(4250, 2)));
                assert_eq!(args.failures_out, Some(PathBuf::from("failed.json")));
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_resend_requires_from() {
        assert!(Cli::try_parse_from(["invoice-dispatch", "resend"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["invoice-dispatch", "-q", "-v", "validate"]).is_err());
    }
}
