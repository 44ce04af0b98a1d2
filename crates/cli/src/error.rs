//! Error types for CLI operations.

use contracts::Decimal;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Failures file could not be read or written
    #[error("Failures file '{path}': {message}")]
    FailuresFile { path: String, message: String },

    /// At least one invoice was not accepted by the sink
    #[error("{failed} invoice(s) failed delivery (total amount {amount})")]
    DeliveryFailed { failed: usize, amount: Decimal },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn failures_file(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FailuresFile {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
