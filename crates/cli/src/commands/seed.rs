//! `seed` command implementation.

use anyhow::{Context, Result};
use contracts::StoreType;
use tracing::{info, warn};

use crate::cli::StoreArgs;

use super::load_blueprint;

/// Execute the `seed` command
pub fn run_seed(args: &StoreArgs) -> Result<()> {
    let blueprint = load_blueprint(&args.config)?;

    if blueprint.store.store_type == StoreType::Memory {
        warn!("Memory stores are seeded on every run; nothing to do");
        return Ok(());
    }

    if blueprint.store.seed.is_empty() {
        warn!("No seed invoices configured");
        return Ok(());
    }

    let store = record_store::open_store(&blueprint.store).context("Failed to open store")?;
    let inserted = store
        .insert_all(&blueprint.store.seed)
        .context("Failed to seed store")?;

    info!(inserted, "Store seeded");
    println!("✓ Inserted {inserted} invoice(s)");
    Ok(())
}
