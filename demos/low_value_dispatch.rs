//! Low-value dispatch demo
//!
//! Seeds a memory store, rejects one customer at the mock sink and prints what failed.
//! Pass a config path to run against that configuration instead.
//!
//! Run with: cargo run -p demos --bin low_value_dispatch [config.toml]

use std::sync::Arc;

use config_loader::ConfigLoader;
use contracts::{Decimal, Invoice, PipelineBlueprint, SinkConfig, SinkType};
use dispatcher::create_dispatcher;
use record_store::open_store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let blueprint = if let Some(path) = std::env::args().nth(1) {
        tracing::info!(path = %path, "Loading blueprint config");
        ConfigLoader::load_from_path(std::path::Path::new(&path))?
    } else {
        demo_blueprint()?
    };

    let store = Arc::new(open_store(&blueprint.store)?);
    let mut dispatcher = create_dispatcher(store, &blueprint)?;

    let report = dispatcher.dispatch_low_value_report().await?;
    dispatcher.shutdown().await;

    println!(
        "attempted {} / delivered {} / failed {}",
        report.attempted(),
        report.delivered(),
        report.failed()
    );
    for (invoice, error) in report.failures() {
        println!("  {invoice}: {error}");
    }

    Ok(())
}

fn demo_blueprint() -> Result<PipelineBlueprint, contracts::ContractError> {
    let mut blueprint = PipelineBlueprint::with_sink(SinkConfig {
        name: "accounting".to_string(),
        sink_type: SinkType::Mock,
        params: [("fail_customers".to_string(), "C".to_string())].into(),
    });
    blueprint.store.seed = vec![
        Invoice::new("A", Decimal::from(50))?,
        Invoice::new("B", Decimal::from(150))?,
        Invoice::new("C", Decimal::from(99))?,
    ];
    Ok(blueprint)
}
