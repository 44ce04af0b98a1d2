//! In-memory record store
//!
//! Ordered vector behind a lock. Used for tests, rehearsals and seeded runs; supports
//! switching the store off to exercise the store-fatal path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockWriteGuard};

use contracts::{ContractError, Invoice, InvoiceStore};
use tracing::{debug, instrument};

use crate::error::RecordStoreError;

/// In-memory invoice store
pub struct InMemoryInvoiceStore {
    name: String,
    records: RwLock<Vec<Invoice>>,
    unavailable: AtomicBool,
}

impl InMemoryInvoiceStore {
    /// Create an empty store
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_invoices(name, Vec::new())
    }

    /// Create a store pre-loaded with `invoices`, in order
    pub fn with_invoices(name: impl Into<String>, invoices: Vec<Invoice>) -> Self {
        Self {
            name: name.into(),
            records: RwLock::new(invoices),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Append one invoice
    pub fn insert(&self, invoice: Invoice) -> Result<(), RecordStoreError> {
        self.write_records()?.push(invoice);
        Ok(())
    }

    /// Append invoices, preserving their order
    pub fn insert_all(
        &self,
        invoices: impl IntoIterator<Item = Invoice>,
    ) -> Result<usize, RecordStoreError> {
        let mut records = self.write_records()?;
        let before = records.len();
        records.extend(invoices);
        Ok(records.len() - before)
    }

    /// Number of stored invoices
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether the store holds no invoices
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every subsequent read fail until switched back
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), RecordStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(RecordStoreError::Unavailable {
                store: self.name.clone(),
            })
        } else {
            Ok(())
        }
    }

    fn write_records(&self) -> Result<RwLockWriteGuard<'_, Vec<Invoice>>, RecordStoreError> {
        self.records
            .write()
            .map_err(|_| RecordStoreError::poisoned(&self.name))
    }

    fn snapshot(&self) -> Result<Vec<Invoice>, RecordStoreError> {
        self.ensure_available()?;
        let records = self
            .records
            .read()
            .map_err(|_| RecordStoreError::poisoned(&self.name))?;
        Ok(records.clone())
    }

    fn clear(&self) -> Result<(), RecordStoreError> {
        self.ensure_available()?;
        self.write_records()?.clear();
        Ok(())
    }
}

impl InvoiceStore for InMemoryInvoiceStore {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "memory_store_fetch_all", skip(self), fields(store = %self.name))]
    async fn fetch_all(&self) -> Result<Vec<Invoice>, ContractError> {
        let invoices = self.snapshot()?;
        debug!(store = %self.name, count = invoices.len(), "Fetched invoices");
        Ok(invoices)
    }

    #[instrument(name = "memory_store_reset", skip(self), fields(store = %self.name))]
    async fn reset(&self) -> Result<(), ContractError> {
        self.clear()?;
        debug!(store = %self.name, "Store reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Decimal;

    fn invoice(customer: &str, amount: i64) -> Invoice {
        Invoice::new(customer, Decimal::from(amount)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_all_preserves_insertion_order() {
        let store = InMemoryInvoiceStore::new("mem");
        store.insert(invoice("A", 50)).unwrap();
        store.insert(invoice("B", 150)).unwrap();
        store.insert(invoice("C", 99)).unwrap();

        let all = store.fetch_all().await.unwrap();
        let customers: Vec<_> = all.iter().map(Invoice::customer).collect();
        assert_eq!(customers, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_reset_visible_to_next_fetch() {
        let store = InMemoryInvoiceStore::with_invoices("mem", vec![invoice("A", 1)]);
        assert_eq!(store.len(), 1);

        store.reset().await.unwrap();
        assert!(store.fetch_all().await.unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_fetch() {
        let store = InMemoryInvoiceStore::with_invoices("mem", vec![invoice("A", 1)]);
        store.set_unavailable(true);

        let err = store.fetch_all().await.unwrap_err();
        assert!(matches!(err, ContractError::StoreUnavailable { .. }));
        assert!(err.is_store_error());

        store.set_unavailable(false);
        assert_eq!(store.fetch_all().await.unwrap().len(), 1);
    }

    #[test]
    fn test_insert_all_counts() {
        let store = InMemoryInvoiceStore::new("mem");
        let added = store
            .insert_all(vec![invoice("A", 1), invoice("A", 1)])
            .unwrap();
        // identical invoices are stored twice
        assert_eq!(added, 2);
        assert_eq!(store.len(), 2);
    }
}
