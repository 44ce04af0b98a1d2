//! Layered error definitions
//!
//! Categorized by source: config / invoice / store / sink / io

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Invoice Errors =====
    /// Invoice failed value-object validation
    #[error("invalid invoice for customer '{customer}': {message}")]
    InvalidInvoice { customer: String, message: String },

    // ===== Store Errors =====
    /// Record store cannot produce a record set
    #[error("record store '{store}' unavailable: {message}")]
    StoreUnavailable { store: String, message: String },

    /// Record store returned data that cannot be read back as invoices
    #[error("record store '{store}' corrupted: {message}")]
    StoreCorrupted { store: String, message: String },

    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    /// Sink connection error
    #[error("sink '{sink_name}' connection error: {message}")]
    SinkConnection { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create invalid invoice error
    pub fn invalid_invoice(customer: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInvoice {
            customer: customer.into(),
            message: message.into(),
        }
    }

    /// Create store unavailable error
    pub fn store_unavailable(store: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            store: store.into(),
            message: message.into(),
        }
    }

    /// Create store corrupted error
    pub fn store_corrupted(store: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StoreCorrupted {
            store: store.into(),
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Whether the error comes from the record store
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable { .. } | Self::StoreCorrupted { .. }
        )
    }
}
