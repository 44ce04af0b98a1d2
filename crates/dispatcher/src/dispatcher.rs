//! InvoiceDispatcher - sends low-value invoices to the accounting sink
//!
//! Delivery is best-effort: one invoice failing never stops the batch, and failures are
//! collected in the order they happened. Sends are awaited one at a time and never
//! retried.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use contracts::{Invoice, InvoiceSink, InvoiceStore, PipelineBlueprint, SinkConfig, SinkType};
use filter::InvoiceFilter;
use observability::{record_invoice_dispatched, record_store_failure};

use crate::error::DispatcherError;
use crate::report::{DeliveryOutcome, DispatchReport};
use crate::sinks::{ConfiguredSink, FileSink, LogSink, MockSink};

/// Dispatch stage
///
/// Owns the filter it draws candidates from and the sink it delivers to.
pub struct InvoiceDispatcher<S, K> {
    filter: InvoiceFilter<S>,
    sink: K,
}

impl<S, K> InvoiceDispatcher<S, K>
where
    S: InvoiceStore + Sync,
    K: InvoiceSink,
{
    /// Create a dispatcher from a filter and a sink
    pub fn new(filter: InvoiceFilter<S>, sink: K) -> Self {
        Self { filter, sink }
    }

    /// Filter used to select candidates
    pub fn filter(&self) -> &InvoiceFilter<S> {
        &self.filter
    }

    /// Sink invoices are delivered to
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Dispatch every low-value invoice and return the ones that failed
    ///
    /// An empty result means every candidate was accepted (or there were none).
    ///
    /// # Errors
    /// `DispatcherError::Filter` if the store could not be read; the sink is not called.
    pub async fn dispatch_low_value_invoices(&mut self) -> Result<Vec<Invoice>, DispatcherError> {
        Ok(self.dispatch_low_value_report().await?.into_failed())
    }

    /// Like `dispatch_low_value_invoices`, keeping every outcome and error
    #[instrument(
        name = "dispatcher_dispatch_low_value",
        skip(self),
        fields(sink = %self.sink.name(), threshold = %self.filter.threshold())
    )]
    pub async fn dispatch_low_value_report(&mut self) -> Result<DispatchReport, DispatcherError> {
        let candidates = match self.filter.select_low_value().await {
            Ok(candidates) => candidates,
            Err(e) => {
                record_store_failure(self.filter.store().name());
                error!(error = %e, "Candidate selection failed, nothing dispatched");
                return Err(e.into());
            }
        };

        Ok(self.dispatch_batch(candidates).await)
    }

    /// Send `invoices` in order, one at a time, collecting each outcome
    #[instrument(
        name = "dispatcher_dispatch_batch",
        skip(self, invoices),
        fields(sink = %self.sink.name(), batch = invoices.len())
    )]
    pub async fn dispatch_batch(&mut self, invoices: Vec<Invoice>) -> DispatchReport {
        let mut report = DispatchReport::with_capacity(invoices.len());

        for invoice in invoices {
            let outcome = self.attempt(invoice).await;
            report.push(outcome);
        }

        if report.is_clean() {
            info!(attempted = report.attempted(), "Dispatch complete");
        } else {
            warn!(
                attempted = report.attempted(),
                delivered = report.delivered(),
                failed = report.failed(),
                failed_amount = %report.failed_amount(),
                "Dispatch complete with failures"
            );
        }

        report
    }

    async fn attempt(&mut self, invoice: Invoice) -> DeliveryOutcome {
        match self.sink.send(&invoice).await {
            Ok(()) => {
                record_invoice_dispatched(self.sink.name(), true);
                debug!(customer = %invoice.customer(), amount = %invoice.amount(), "Invoice delivered");
                DeliveryOutcome::Delivered(invoice)
            }
            Err(error) => {
                record_invoice_dispatched(self.sink.name(), false);
                error!(
                    sink = %self.sink.name(),
                    customer = %invoice.customer(),
                    amount = %invoice.amount(),
                    error = %error,
                    "Invoice delivery failed"
                );
                DeliveryOutcome::Failed { invoice, error }
            }
        }
    }

    /// Close the sink
    ///
    /// A close failure is logged; every outcome was already reported by then.
    #[instrument(name = "dispatcher_shutdown", skip(self), fields(sink = %self.sink.name()))]
    pub async fn shutdown(mut self) {
        if let Err(e) = self.sink.close().await {
            warn!(error = %e, "Sink close failed");
        }
        info!("Dispatcher shutdown complete");
    }
}

/// Create a sink from configuration
#[instrument(
    name = "dispatcher_create_sink",
    skip(config),
    fields(sink = %config.name, sink_type = ?config.sink_type)
)]
pub fn create_sink(config: &SinkConfig) -> Result<ConfiguredSink, DispatcherError> {
    match config.sink_type {
        SinkType::Log => Ok(ConfiguredSink::Log(LogSink::new(&config.name))),
        SinkType::File => {
            let sink = FileSink::from_params(&config.name, &config.params)
                .map_err(|e| DispatcherError::sink_creation(&config.name, e.to_string()))?;
            Ok(ConfiguredSink::File(sink))
        }
        SinkType::Mock => Ok(ConfiguredSink::Mock(MockSink::from_params(
            &config.name,
            &config.params,
        ))),
    }
}

/// Convenience function to create a dispatcher from a blueprint and an open store
#[instrument(name = "dispatcher_create", skip_all)]
pub fn create_dispatcher<S>(
    store: Arc<S>,
    blueprint: &PipelineBlueprint,
) -> Result<InvoiceDispatcher<S, ConfiguredSink>, DispatcherError>
where
    S: InvoiceStore + Sync,
{
    let sink = create_sink(&blueprint.sink)?;
    let filter = InvoiceFilter::with_threshold(store, blueprint.filter.threshold);
    Ok(InvoiceDispatcher::new(filter, sink))
}
