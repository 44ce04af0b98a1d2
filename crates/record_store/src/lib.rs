//! # Record Store
//!
//! Invoice persistence behind the `InvoiceStore` contract.
//!
//! Responsibilities:
//! - In-memory store for tests and seeded rehearsals
//! - SQLite store for durable records
//! - Build the configured store from `StoreConfig`
//!
//! ## Usage Example
//!
//! ```ignore
//! use contracts::InvoiceStore;
//! use record_store::SqliteInvoiceStore;
//!
//! let store = SqliteInvoiceStore::open("invoices", "invoices.db")?;
//! let all = store.fetch_all().await?;
//! ```

mod error;
mod factory;
mod memory;
mod sqlite;

// Re-exports
pub use contracts::{Invoice, InvoiceStore};
pub use error::{RecordStoreError, Result};
pub use factory::{open_store, ConfiguredStore, DEFAULT_STORE_NAME};
pub use memory::InMemoryInvoiceStore;
pub use sqlite::SqliteInvoiceStore;
