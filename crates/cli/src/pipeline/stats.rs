//! Pipeline statistics.

use std::time::Duration;

use contracts::{Decimal, Invoice};
use dispatcher::DispatchReport;
use observability::AmountTally;

/// Statistics from one dispatch run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Store the candidates came from
    pub store: String,

    /// Sink the invoices were sent to
    pub sink: String,

    /// Invoices handed to the sink
    pub attempted: usize,

    /// Amounts the sink accepted
    pub delivered: AmountTally,

    /// Amounts the sink rejected
    pub failed: AmountTally,

    /// Rejected invoices, in processing order
    pub failed_invoices: Vec<Invoice>,

    /// Total duration of the run
    pub duration: Duration,
}

impl PipelineStats {
    /// Summarize a dispatch report
    pub fn from_report(
        store: impl Into<String>,
        sink: impl Into<String>,
        report: DispatchReport,
        duration: Duration,
    ) -> Self {
        let mut delivered = AmountTally::default();
        for outcome in report.outcomes().iter().filter(|o| o.is_delivered()) {
            delivered.push(outcome.invoice().amount());
        }

        let attempted = report.attempted();
        let failed_invoices = report.into_failed();
        let mut failed = AmountTally::default();
        for invoice in &failed_invoices {
            failed.push(invoice.amount());
        }

        Self {
            store: store.into(),
            sink: sink.into(),
            attempted,
            delivered,
            failed,
            failed_invoices,
            duration,
        }
    }

    /// True when every attempted invoice was delivered
    pub fn is_clean(&self) -> bool {
        self.failed_invoices.is_empty()
    }

    /// Sum of the rejected amounts
    pub fn failed_amount(&self) -> Decimal {
        self.failed.total()
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Dispatch Summary ===\n");
        println!("  Store: {}", self.store);
        println!("  Sink: {}", self.sink);
        println!("  Duration: {:.3}s", self.duration.as_secs_f64());
        println!("  Attempted: {}", self.attempted);
        println!("  Delivered: {} [{}]", self.delivered.count(), self.delivered);
        println!("  Failed: {} [{}]", self.failed.count(), self.failed);

        if !self.failed_invoices.is_empty() {
            println!("\nFailed invoices:");
            for invoice in &self.failed_invoices {
                println!("  - {invoice}");
            }
        }

        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::ContractError;
    use dispatcher::DeliveryOutcome;

    fn invoice(customer: &str, amount: i64) -> Invoice {
        Invoice::new(customer, Decimal::from(amount)).unwrap()
    }

    #[test]
    fn test_from_report() {
        let mut report = DispatchReport::default();
        report.push(DeliveryOutcome::Delivered(invoice("B", 20)));
        report.push(DeliveryOutcome::Failed {
            invoice: invoice("A", 50),
            error: ContractError::sink_write("mock", "rejected"),
        });

        let stats = PipelineStats::from_report("mem", "mock", report, Duration::from_millis(5));

        assert_eq!(stats.attempted, 2);
        assert_eq!(stats.delivered.count(), 1);
        assert_eq!(stats.failed_invoices, vec![invoice("A", 50)]);
        assert_eq!(stats.failed_amount(), Decimal::from(50));
        assert!(!stats.is_clean());
    }

    #[test]
    fn test_empty_report_is_clean() {
        let stats =
            PipelineStats::from_report("mem", "log", DispatchReport::default(), Duration::ZERO);
        assert!(stats.is_clean());
        assert_eq!(stats.failed_amount(), Decimal::ZERO);
    }
}
