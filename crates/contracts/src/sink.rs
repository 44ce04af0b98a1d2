//! InvoiceSink trait - Dispatcher output interface
//!
//! Defines the abstract interface for the external accounting system.

use crate::{ContractError, Invoice};

/// Invoice output trait
///
/// All sink implementations must implement this trait. Transport, authentication and
/// payload encoding are the implementation's business; the dispatcher only looks at
/// success or failure.
#[trait_variant::make(InvoiceSink: Send)]
pub trait LocalInvoiceSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Deliver one invoice
    ///
    /// # Errors
    /// Any rejection, transport error or timeout. Returns only once the attempt is
    /// finished.
    async fn send(&mut self, invoice: &Invoice) -> Result<(), ContractError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), ContractError>;
}
