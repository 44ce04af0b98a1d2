//! LogSink - logs each dispatched invoice via tracing

use contracts::{ContractError, Invoice, InvoiceSink};
use tracing::{info, instrument};

/// Sink that only logs invoices; always succeeds
pub struct LogSink {
    name: String,
    sent: u64,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sent: 0,
        }
    }

    /// Invoices logged so far
    pub fn sent(&self) -> u64 {
        self.sent
    }
}

impl InvoiceSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_send",
        skip(self, invoice),
        fields(sink = %self.name, customer = %invoice.customer())
    )]
    async fn send(&mut self, invoice: &Invoice) -> Result<(), ContractError> {
        self.sent += 1;
        info!(
            sink = %self.name,
            customer = %invoice.customer(),
            amount = %invoice.amount(),
            "Invoice dispatched"
        );
        Ok(())
    }

    #[instrument(name = "log_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        info!(sink = %self.name, sent = self.sent, "LogSink closed");
        Ok(())
    }
}
