//! Per-attempt outcomes and the batch report

use contracts::{ContractError, Decimal, Invoice};

/// Result of one delivery attempt
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// Sink accepted the invoice
    Delivered(Invoice),
    /// Sink reported an error for this invoice
    Failed {
        invoice: Invoice,
        error: ContractError,
    },
}

impl DeliveryOutcome {
    /// Invoice the attempt was for
    pub fn invoice(&self) -> &Invoice {
        match self {
            Self::Delivered(invoice) | Self::Failed { invoice, .. } => invoice,
        }
    }

    /// Whether the sink accepted the invoice
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}

/// Outcomes of one dispatch run, in processing order
#[derive(Debug, Default)]
pub struct DispatchReport {
    outcomes: Vec<DeliveryOutcome>,
}

impl DispatchReport {
    /// Empty report sized for `capacity` attempts
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
        }
    }

    /// Append one outcome
    pub fn push(&mut self, outcome: DeliveryOutcome) {
        self.outcomes.push(outcome);
    }

    /// All outcomes in processing order
    pub fn outcomes(&self) -> &[DeliveryOutcome] {
        &self.outcomes
    }

    /// Number of attempts
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of accepted invoices
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_delivered()).count()
    }

    /// Number of failed invoices
    pub fn failed(&self) -> usize {
        self.attempted() - self.delivered()
    }

    /// True when nothing failed (including an empty batch)
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    /// Failed invoices with their errors, in processing order
    pub fn failures(&self) -> impl Iterator<Item = (&Invoice, &ContractError)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            DeliveryOutcome::Failed { invoice, error } => Some((invoice, error)),
            DeliveryOutcome::Delivered(_) => None,
        })
    }

    /// Sum of the failed amounts
    pub fn failed_amount(&self) -> Decimal {
        self.failures().map(|(invoice, _)| invoice.amount()).sum()
    }

    /// Sum of the delivered amounts
    pub fn delivered_amount(&self) -> Decimal {
        self.outcomes
            .iter()
            .filter(|o| o.is_delivered())
            .map(|o| o.invoice().amount())
            .sum()
    }

    /// Failed invoices, in processing order
    pub fn into_failed(self) -> Vec<Invoice> {
        self.outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                DeliveryOutcome::Failed { invoice, .. } => Some(invoice),
                DeliveryOutcome::Delivered(_) => None,
            })
            .collect()
    }
}
