//! `reset` command implementation.

use anyhow::{Context, Result};
use contracts::{InvoiceStore, StoreType};
use tracing::{info, warn};

use crate::cli::StoreArgs;

use super::load_blueprint;

/// Execute the `reset` command
pub async fn run_reset(args: &StoreArgs) -> Result<()> {
    let blueprint = load_blueprint(&args.config)?;

    if blueprint.store.store_type == StoreType::Memory {
        warn!("Memory store lives only for one process; nothing to reset");
        return Ok(());
    }

    let store = record_store::open_store(&blueprint.store).context("Failed to open store")?;
    store.reset().await.context("Failed to reset store")?;

    info!(store = %store.name(), "Store reset");
    println!("✓ Store '{}' reset", store.name());
    Ok(())
}
