//! Pipeline orchestrator - wires store, filter and dispatcher for one run.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use contracts::{Invoice, InvoiceSink, InvoiceStore, PipelineBlueprint};
use dispatcher::{create_dispatcher, DispatchReport, InvoiceDispatcher};
use filter::InvoiceFilter;
use record_store::{open_store, ConfiguredStore};
use tracing::info;

use super::PipelineStats;

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The validated pipeline blueprint
    pub blueprint: PipelineBlueprint,

    /// Metrics server port (None = disabled)
    pub metrics_port: Option<u16>,
}

/// Main pipeline orchestrator
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Select candidates without dispatching anything
    pub async fn select(self) -> Result<Vec<Invoice>> {
        let store = self.open_store()?;
        let filter = InvoiceFilter::with_threshold(store, self.config.blueprint.filter.threshold);
        let candidates = filter
            .select_low_value()
            .await
            .context("Failed to select low-value invoices")?;
        Ok(candidates)
    }

    /// Run one dispatch of every low-value invoice
    pub async fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();
        self.init_metrics()?;

        let store = self.open_store()?;
        let mut dispatcher = create_dispatcher(store, &self.config.blueprint)
            .context("Failed to create dispatcher")?;

        let report = dispatcher
            .dispatch_low_value_report()
            .await
            .context("Dispatch aborted")?;

        Ok(Self::finish(dispatcher, report, start_time).await)
    }

    /// Send `invoices` as-is through the configured sink, without filtering
    pub async fn resend(self, invoices: Vec<Invoice>) -> Result<PipelineStats> {
        let start_time = Instant::now();
        self.init_metrics()?;

        let store = self.open_store()?;
        let mut dispatcher = create_dispatcher(store, &self.config.blueprint)
            .context("Failed to create dispatcher")?;

        info!(invoices = invoices.len(), "Re-submitting invoices");
        let report = dispatcher.dispatch_batch(invoices).await;

        Ok(Self::finish(dispatcher, report, start_time).await)
    }

    fn init_metrics(&self) -> Result<()> {
        if let Some(port) = self.config.metrics_port {
            observability::init_metrics_only(port)?;
            info!("Metrics endpoint available on port {}", port);
        }
        Ok(())
    }

    fn open_store(&self) -> Result<Arc<ConfiguredStore>> {
        let store = open_store(&self.config.blueprint.store).context("Failed to open store")?;
        Ok(Arc::new(store))
    }

    async fn finish<K: InvoiceSink>(
        dispatcher: InvoiceDispatcher<ConfiguredStore, K>,
        report: DispatchReport,
        start_time: Instant,
    ) -> PipelineStats {
        let store = dispatcher.filter().store().name().to_string();
        let sink = dispatcher.sink().name().to_string();
        dispatcher.shutdown().await;

        PipelineStats::from_report(store, sink, report, start_time.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{Decimal, SinkConfig, SinkType};
    use std::collections::HashMap;

    fn invoice(customer: &str, amount: i64) -> Invoice {
        Invoice::new(customer, Decimal::from(amount)).unwrap()
    }

    fn mock_config(fail_customers: &str) -> PipelineConfig {
        let mut params = HashMap::new();
        params.insert("fail_customers".to_string(), fail_customers.to_string());
        let mut blueprint = PipelineBlueprint::with_sink(SinkConfig {
            name: "accounting".to_string(),
            sink_type: SinkType::Mock,
            params,
        });
        blueprint.store.seed = vec![invoice("A", 50), invoice("B", 150), invoice("C", 99)];

        PipelineConfig {
            blueprint,
            metrics_port: None,
        }
    }

    #[tokio::test]
    async fn test_run_reports_failures() {
        let stats = Pipeline::new(mock_config("C")).run().await.unwrap();

        assert_eq!(stats.attempted, 2);
        assert_eq!(stats.failed_invoices, vec![invoice("C", 99)]);
        assert_eq!(stats.sink, "accounting");
    }

    #[tokio::test]
    async fn test_select_is_dry() {
        let candidates = Pipeline::new(mock_config("")).select().await.unwrap();
        assert_eq!(candidates, vec![invoice("A", 50), invoice("C", 99)]);
    }

    #[tokio::test]
    async fn test_resend_skips_filtering() {
        let stats = Pipeline::new(mock_config(""))
            .resend(vec![invoice("B", 150)])
            .await
            .unwrap();

        assert_eq!(stats.attempted, 1);
        assert!(stats.is_clean());
    }
}
