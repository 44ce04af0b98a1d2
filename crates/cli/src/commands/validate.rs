//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{Decimal, PipelineBlueprint, SinkType, StoreType};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    store_type: String,
    seed_count: usize,
    threshold: Decimal,
    sink_name: String,
    sink_type: String,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    store_type: format!("{:?}", blueprint.store.store_type),
                    seed_count: blueprint.store.seed.len(),
                    threshold: blueprint.filter.threshold,
                    sink_name: blueprint.sink.name.clone(),
                    sink_type: format!("{:?}", blueprint.sink.sink_type),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &PipelineBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.store.store_type == StoreType::Memory && blueprint.store.seed.is_empty() {
        warnings.push("Memory store has no seed invoices - nothing will be dispatched".to_string());
    }

    if blueprint.filter.threshold.is_zero() {
        warnings.push("filter.threshold is 0 - no invoice can be selected".to_string());
    }

    if blueprint.sink.sink_type == SinkType::Mock {
        warnings.push(format!(
            "Sink '{}' is a mock - invoices are not delivered anywhere",
            blueprint.sink.name
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Store: {} ({} seed invoices)", summary.store_type, summary.seed_count);
            println!("  Threshold: {}", summary.threshold);
            println!("  Sink: {} ({})", summary.sink_name, summary.sink_type);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
