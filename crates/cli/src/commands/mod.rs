//! Command implementations.

mod failures;
mod reset;
mod resend;
mod run;
mod seed;
mod validate;

pub use reset::run_reset;
pub use resend::run_resend;
pub use run::run_pipeline;
pub use seed::run_seed;
pub use validate::run_validate;

use anyhow::{Context, Result};
use contracts::PipelineBlueprint;
use std::path::Path;

use crate::error::CliError;

/// Load and validate the configuration file
fn load_blueprint(path: &Path) -> Result<PipelineBlueprint> {
    if !path.exists() {
        return Err(CliError::config_not_found(path.display().to_string()).into());
    }

    config_loader::ConfigLoader::load_from_path(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}
