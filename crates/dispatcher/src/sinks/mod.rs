//! Sink implementations
//!
//! Contains LogSink, FileSink, MockSink and the config-driven `ConfiguredSink`.

mod file;
mod log;
mod mock;

pub use self::file::{FileSink, FileSinkConfig};
pub use self::log::LogSink;
pub use self::mock::{AttemptLog, MockSink, MockSinkConfig};

use contracts::{ContractError, Invoice, InvoiceSink, SinkType};

/// Sink built from a `SinkConfig`
pub enum ConfiguredSink {
    Log(LogSink),
    File(FileSink),
    Mock(MockSink),
}

impl ConfiguredSink {
    /// Configured sink type
    pub fn sink_type(&self) -> SinkType {
        match self {
            Self::Log(_) => SinkType::Log,
            Self::File(_) => SinkType::File,
            Self::Mock(_) => SinkType::Mock,
        }
    }
}

impl InvoiceSink for ConfiguredSink {
    fn name(&self) -> &str {
        match self {
            Self::Log(sink) => sink.name(),
            Self::File(sink) => sink.name(),
            Self::Mock(sink) => sink.name(),
        }
    }

    async fn send(&mut self, invoice: &Invoice) -> Result<(), ContractError> {
        match self {
            Self::Log(sink) => sink.send(invoice).await,
            Self::File(sink) => sink.send(invoice).await,
            Self::Mock(sink) => sink.send(invoice).await,
        }
    }

    async fn close(&mut self) -> Result<(), ContractError> {
        match self {
            Self::Log(sink) => sink.close().await,
            Self::File(sink) => sink.close().await,
            Self::Mock(sink) => sink.close().await,
        }
    }
}
