//! InvoiceFilter - selects low-value invoices from the record store

use std::sync::Arc;

use contracts::{Decimal, Invoice, InvoiceStore, DEFAULT_LOW_VALUE_THRESHOLD};
use observability::record_filter_run;
use tracing::{debug, instrument};

use crate::error::FilterError;

/// Filter stage
///
/// Holds the store it reads from; the store is injected at construction and never
/// looked up globally.
pub struct InvoiceFilter<S> {
    store: Arc<S>,
    threshold: Decimal,
}

impl<S: InvoiceStore + Sync> InvoiceFilter<S> {
    /// Create a filter with the default threshold (100)
    pub fn new(store: Arc<S>) -> Self {
        Self::with_threshold(store, DEFAULT_LOW_VALUE_THRESHOLD)
    }

    /// Create a filter with a custom default threshold
    pub fn with_threshold(store: Arc<S>, threshold: Decimal) -> Self {
        Self { store, threshold }
    }

    /// Configured threshold
    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    /// Injected store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Select invoices below the configured threshold
    pub async fn select_low_value(&self) -> Result<Vec<Invoice>, FilterError> {
        self.select_below(self.threshold).await
    }

    /// Select invoices strictly below `threshold`
    ///
    /// Fetches the whole record set once. Order follows the store.
    ///
    /// # Errors
    /// `FilterError::Store` if the fetch fails; no partial result is returned.
    #[instrument(
        name = "invoice_filter_select",
        skip_all,
        fields(store = %self.store.name(), threshold = %threshold)
    )]
    pub async fn select_below(&self, threshold: Decimal) -> Result<Vec<Invoice>, FilterError> {
        let all = self
            .store
            .fetch_all()
            .await
            .map_err(|source| FilterError::Store {
                store: self.store.name().to_string(),
                source,
            })?;

        let fetched = all.len();
        let selected = select_below(all, threshold);

        debug!(fetched, selected = selected.len(), "Invoices filtered");
        record_filter_run(fetched, selected.len());

        Ok(selected)
    }
}

/// Keep invoices whose amount is strictly below `threshold`, preserving order
pub fn select_below(invoices: Vec<Invoice>, threshold: Decimal) -> Vec<Invoice> {
    invoices
        .into_iter()
        .filter(|invoice| invoice.is_below(threshold))
        .collect()
}
