//! Pipeline metrics
//!
//! Counters recorded through the `metrics` facade, plus an in-memory amount tally for
//! end-of-run summaries.

use std::fmt;

use contracts::Decimal;
use metrics::{counter, gauge};

/// Record one filter run
///
/// Called once per `select_low_value` with the fetched and selected counts.
pub fn record_filter_run(fetched: usize, selected: usize) {
    counter!("invoice_dispatch_filter_runs_total").increment(1);
    counter!("invoice_dispatch_invoices_fetched_total").increment(fetched as u64);
    counter!("invoice_dispatch_invoices_selected_total").increment(selected as u64);
    gauge!("invoice_dispatch_last_selected").set(selected as f64);
}

/// Record one delivery attempt
pub fn record_invoice_dispatched(sink_name: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "invoice_dispatch_invoices_dispatched_total",
        "sink" => sink_name.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a batch-fatal store failure
pub fn record_store_failure(store_name: &str) {
    counter!(
        "invoice_dispatch_store_failures_total",
        "store" => store_name.to_string()
    )
    .increment(1);
}

/// Exact running tally of invoice amounts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountTally {
    count: u64,
    total: Decimal,
    min: Option<Decimal>,
    max: Option<Decimal>,
}

impl AmountTally {
    /// Add one amount
    pub fn push(&mut self, amount: Decimal) {
        self.count += 1;
        self.total += amount;
        self.min = Some(self.min.map_or(amount, |m| m.min(amount)));
        self.max = Some(self.max.map_or(amount, |m| m.max(amount)));
    }

    /// Number of amounts
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of amounts
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Smallest amount seen
    pub fn min(&self) -> Option<Decimal> {
        self.min
    }

    /// Largest amount seen
    pub fn max(&self) -> Option<Decimal> {
        self.max
    }
}

impl<'a> FromIterator<&'a Decimal> for AmountTally {
    fn from_iter<I: IntoIterator<Item = &'a Decimal>>(iter: I) -> Self {
        let mut tally = Self::default();
        for amount in iter {
            tally.push(*amount);
        }
        tally
    }
}

impl fmt::Display for AmountTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(
                f,
                "total={}, min={}, max={} (n={})",
                self.total, min, max, self.count
            ),
            _ => write!(f, "N/A"),
        }
    }
}
