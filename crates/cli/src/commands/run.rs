//! `run` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::RunArgs;
use crate::error::CliError;
use crate::pipeline::{Pipeline, PipelineConfig, PipelineStats};

use super::failures::write_failures;
use super::load_blueprint;

/// Execute the `run` command
pub async fn run_pipeline(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    let mut blueprint = load_blueprint(&args.config)?;

    // Apply CLI overrides
    if let Some(threshold) = args.threshold {
        info!(threshold = %threshold, "Overriding threshold from CLI");
        blueprint.filter.threshold = threshold;
        config_loader::ConfigLoader::validate(&blueprint)
            .context("Invalid threshold override")?;
    }

    info!(
        store_type = ?blueprint.store.store_type,
        threshold = %blueprint.filter.threshold,
        sink = %blueprint.sink.name,
        sink_type = ?blueprint.sink.sink_type,
        "Configuration loaded"
    );

    let pipeline = Pipeline::new(PipelineConfig {
        blueprint,
        metrics_port: if args.metrics_port == 0 {
            None
        } else {
            Some(args.metrics_port)
        },
    });

    // Dry run - select only
    if args.dry_run {
        let candidates = pipeline.select().await?;
        info!(selected = candidates.len(), "Dry run mode - nothing dispatched");
        println!("\n=== Low-value candidates ({}) ===\n", candidates.len());
        for invoice in &candidates {
            println!("  - {invoice}");
        }
        println!();
        return Ok(());
    }

    let stats = pipeline.run().await.context("Pipeline execution failed")?;
    report_stats(&stats, args.failures_out.as_deref())
}

/// Print the summary, write the failures file, and turn failures into an error
pub(super) fn report_stats(
    stats: &PipelineStats,
    failures_out: Option<&std::path::Path>,
) -> Result<()> {
    info!(
        attempted = stats.attempted,
        delivered = stats.delivered.count(),
        failed = stats.failed_invoices.len(),
        duration_secs = stats.duration.as_secs_f64(),
        "Dispatch finished"
    );
    stats.print_summary();

    if let Some(path) = failures_out {
        write_failures(path, &stats.failed_invoices)?;
        info!(path = %path.display(), failed = stats.failed_invoices.len(), "Failures written");
    }

    if stats.is_clean() {
        Ok(())
    } else {
        Err(CliError::DeliveryFailed {
            failed: stats.failed_invoices.len(),
            amount: stats.failed_amount(),
        }
        .into())
    }
}
