//! `resend` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::ResendArgs;
use crate::pipeline::{Pipeline, PipelineConfig};

use super::failures::read_failures;
use super::load_blueprint;
use super::run::report_stats;

/// Execute the `resend` command
pub async fn run_resend(args: &ResendArgs) -> Result<()> {
    let blueprint = load_blueprint(&args.config)?;
    let invoices = read_failures(&args.from)?;

    info!(
        from = %args.from.display(),
        invoices = invoices.len(),
        sink = %blueprint.sink.name,
        "Loaded failed invoices"
    );

    let stats = Pipeline::new(PipelineConfig {
        blueprint,
        metrics_port: None,
    })
    .resend(invoices)
    .await
    .context("Re-submission failed")?;

    report_stats(&stats, args.failures_out.as_deref())
}
