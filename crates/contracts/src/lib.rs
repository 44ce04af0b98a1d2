//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace: the invoice value
//! object, the record store and sink traits, the layered error type and the pipeline
//! configuration blueprint.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Money Model
//! - Amounts are exact decimals (`rust_decimal::Decimal`), never binary floats
//! - An invoice is identified by its `(customer, amount)` pair only

mod blueprint;
mod error;
mod invoice;
mod sink;
mod store;

pub use blueprint::*;
pub use error::*;
pub use invoice::Invoice;
pub use rust_decimal::Decimal;
pub use sink::*;
pub use store::*;
