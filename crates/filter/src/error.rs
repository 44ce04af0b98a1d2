//! Filter error types

use contracts::ContractError;
use thiserror::Error;

/// Filter stage error
///
/// Only a failed fetch can fail the filter; selection itself is infallible.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Store could not produce a record set
    #[error("failed to fetch invoices from store '{store}': {source}")]
    Store {
        /// Store name
        store: String,
        /// Store error
        #[source]
        source: ContractError,
    },
}

impl FilterError {
    /// Underlying store error
    pub fn store_error(&self) -> &ContractError {
        match self {
            Self::Store { source, .. } => source,
        }
    }
}
