//! InvoiceStore trait - Record store input interface
//!
//! The pipeline only reads through this trait; persistence, transactions and connection
//! handling belong to the implementation.

use crate::{ContractError, Invoice};

/// Record store trait
///
/// Any implementation satisfies the contract as long as `fetch_all` reflects every write
/// completed before the call, and `reset` is visible to every later `fetch_all`.
#[trait_variant::make(InvoiceStore: Send)]
pub trait LocalInvoiceStore {
    /// Store name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Read the complete current record set, in store order
    ///
    /// # Errors
    /// `StoreUnavailable` / `StoreCorrupted` when no record set can be produced.
    /// No partial result is ever returned.
    async fn fetch_all(&self) -> Result<Vec<Invoice>, ContractError>;

    /// Remove all records
    async fn reset(&self) -> Result<(), ContractError>;
}
