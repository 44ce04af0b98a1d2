//! FileSink - appends dispatched invoices to a JSON-lines outbox file

use contracts::{ContractError, Decimal, Invoice, InvoiceSink};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument, warn};

/// Configuration for FileSink
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Outbox file, created if missing and appended to otherwise
    pub path: PathBuf,
}

impl FileSinkConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Option<Self> {
        params
            .get("path")
            .filter(|p| !p.trim().is_empty())
            .map(|p| Self {
                path: PathBuf::from(p),
            })
    }
}

/// One outbox line
#[derive(Serialize)]
struct DispatchRecord<'a> {
    customer: &'a str,
    amount: Decimal,
    dispatched_at: String,
}

/// Sink that appends one JSON object per invoice to a file
///
/// Each line is written unbuffered and flushed before `send` returns; a failed send
/// leaves nothing of its line in the outbox. Assumes it is the outbox's only writer.
pub struct FileSink {
    name: String,
    config: FileSinkConfig,
    file: Option<File>,
}

impl FileSink {
    /// Create a new FileSink, creating parent directories as needed
    pub fn new(name: impl Into<String>, config: FileSinkConfig) -> std::io::Result<Self> {
        if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.path)?;

        Ok(Self {
            name: name.into(),
            config,
            file: Some(file),
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> std::io::Result<Self> {
        let config = FileSinkConfig::from_params(params).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "file sink requires a 'path' parameter",
            )
        })?;
        Self::new(name, config)
    }

    fn append(&mut self, invoice: &Invoice) -> std::io::Result<()> {
        let file = self.file.as_mut().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink already closed")
        })?;

        let line = encode_line(invoice)?;
        let start = file.metadata()?.len();

        if let Err(e) = file.write_all(&line).and_then(|()| file.flush()) {
            // Cut off a partially written line
            if let Err(truncate) = file.set_len(start) {
                warn!(sink = %self.name, error = %truncate, "Outbox rollback failed");
            }
            return Err(e);
        }
        Ok(())
    }
}

/// Serialize one outbox line, including the trailing newline
fn encode_line(invoice: &Invoice) -> std::io::Result<Vec<u8>> {
    let record = DispatchRecord {
        customer: invoice.customer(),
        amount: invoice.amount(),
        dispatched_at: chrono::Utc::now().to_rfc3339(),
    };
    let mut line = serde_json::to_vec(&record)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    line.push(b'\n');
    Ok(line)
}

impl InvoiceSink for FileSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_sink_send",
        skip(self, invoice),
        fields(sink = %self.name, customer = %invoice.customer())
    )]
    async fn send(&mut self, invoice: &Invoice) -> Result<(), ContractError> {
        self.append(invoice).map_err(|e| {
            error!(sink = %self.name, path = %self.config.path.display(), error = %e, "Write failed");
            ContractError::sink_write(&self.name, e.to_string())
        })?;
        debug!(sink = %self.name, "Invoice appended");
        Ok(())
    }

    #[instrument(name = "file_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        if let Some(file) = self.file.take() {
            file.sync_all()
                .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))?;
        }
        info!(sink = %self.name, path = %self.config.path.display(), "FileSink closed");
        Ok(())
    }
}
