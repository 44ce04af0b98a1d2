//! Dispatcher error types
//!
//! Per-invoice delivery failures never appear here; they are reported in
//! `DispatchReport`.

use filter::FilterError;
use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Sink creation error
    #[error("failed to create sink '{name}': {message}")]
    SinkCreation { name: String, message: String },

    /// Candidate selection failed (store-fatal)
    #[error("invoice selection failed: {0}")]
    Filter(#[from] FilterError),
}

impl DispatcherError {
    /// Create a sink creation error
    pub fn sink_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkCreation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Whether the batch was aborted by the record store
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Filter(_))
    }
}
