//! # Filter
//!
//! Low-value invoice selection.
//!
//! Responsibilities:
//! - Fetch the complete record set from the injected store (one call per run)
//! - Keep invoices whose amount is strictly below the threshold, in store order
//! - Propagate store failures as a single fatal error
//!
//! ## Usage Example
//!
//! ```ignore
//! use filter::InvoiceFilter;
//!
//! let filter = InvoiceFilter::new(Arc::new(store));
//! let low_value = filter.select_low_value().await?;
//! ```

mod error;
mod filter;

// Re-exports
pub use contracts::{Decimal, Invoice, InvoiceStore, DEFAULT_LOW_VALUE_THRESHOLD};
pub use error::FilterError;
pub use filter::{select_below, InvoiceFilter};
