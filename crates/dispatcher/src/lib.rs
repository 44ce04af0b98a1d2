//! # Dispatcher
//!
//! Invoice dispatch module.
//!
//! Responsibilities:
//! - Pull low-value candidates from the filter
//! - Send them to the accounting sink one at a time
//! - Collect failed invoices in order, without retrying

pub mod dispatcher;
pub mod error;
pub mod report;
pub mod sinks;

pub use contracts::{Invoice, InvoiceSink};
pub use dispatcher::{create_dispatcher, create_sink, InvoiceDispatcher};
pub use error::DispatcherError;
pub use report::{DeliveryOutcome, DispatchReport};
pub use sinks::{
    AttemptLog, ConfiguredSink, FileSink, FileSinkConfig, LogSink, MockSink, MockSinkConfig,
};
