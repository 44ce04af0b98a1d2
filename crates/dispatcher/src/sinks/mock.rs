//! MockSink - scripted accounting endpoint for tests and dry runs
//!
//! Params:
//! - `fail_customers`: comma-separated customers whose invoices are rejected
//! - `unreachable`: `"true"` makes every send fail with a connection error
//! - `fail_close`: `"true"` makes `close` return an error

use contracts::{ContractError, Invoice, InvoiceSink};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, instrument};

/// Configuration for MockSink
#[derive(Debug, Clone, Default)]
pub struct MockSinkConfig {
    /// Customers whose invoices are rejected
    pub fail_customers: HashSet<String>,
    /// Reject everything as a connection failure
    pub unreachable: bool,
    /// Fail `close`
    pub fail_close: bool,
}

impl MockSinkConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let fail_customers = params
            .get("fail_customers")
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let flag = |key: &str| {
            params
                .get(key)
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
        };

        Self {
            fail_customers,
            unreachable: flag("unreachable"),
            fail_close: flag("fail_close"),
        }
    }

    /// Reject invoices for these customers
    pub fn failing<I, C>(customers: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            fail_customers: customers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Shared record of every invoice the sink was asked to send
#[derive(Debug, Clone, Default)]
pub struct AttemptLog(Arc<Mutex<Vec<Invoice>>>);

impl AttemptLog {
    /// Copy of the attempts so far, in call order
    pub fn snapshot(&self) -> Vec<Invoice> {
        self.0.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// Number of attempts so far
    pub fn len(&self) -> usize {
        self.0.lock().map(|v| v.len()).unwrap_or_default()
    }

    /// Whether no attempt was made yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, invoice: &Invoice) {
        if let Ok(mut attempts) = self.0.lock() {
            attempts.push(invoice.clone());
        }
    }
}

/// Sink whose failures are decided by configuration
pub struct MockSink {
    name: String,
    config: MockSinkConfig,
    attempts: AttemptLog,
    closed: Arc<AtomicBool>,
}

impl MockSink {
    /// Create a new MockSink
    pub fn new(name: impl Into<String>, config: MockSinkConfig) -> Self {
        Self {
            name: name.into(),
            config,
            attempts: AttemptLog::default(),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sink that accepts everything
    pub fn accepting(name: impl Into<String>) -> Self {
        Self::new(name, MockSinkConfig::default())
    }

    /// Create from params map (for factory)
    pub fn from_params(name: impl Into<String>, params: &HashMap<String, String>) -> Self {
        Self::new(name, MockSinkConfig::from_params(params))
    }

    /// Handle on the attempt log; stays valid after the sink is moved
    pub fn attempts(&self) -> AttemptLog {
        self.attempts.clone()
    }

    /// Whether `close` has succeeded
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Handle on the closed flag; stays valid after the sink is moved
    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }
}

impl InvoiceSink for MockSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "mock_sink_send",
        skip(self, invoice),
        fields(sink = %self.name, customer = %invoice.customer())
    )]
    async fn send(&mut self, invoice: &Invoice) -> Result<(), ContractError> {
        self.attempts.push(invoice);

        if self.config.unreachable {
            return Err(ContractError::SinkConnection {
                sink_name: self.name.clone(),
                message: "endpoint unreachable".to_string(),
            });
        }
        if self.config.fail_customers.contains(invoice.customer()) {
            return Err(ContractError::sink_write(
                &self.name,
                format!("invoice for '{}' rejected", invoice.customer()),
            ));
        }

        debug!(sink = %self.name, "Invoice accepted");
        Ok(())
    }

    async fn close(&mut self) -> Result<(), ContractError> {
        if self.config.fail_close {
            return Err(ContractError::sink_write(&self.name, "close failed"));
        }
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Decimal;

    fn invoice(customer: &str) -> Invoice {
        Invoice::new(customer, Decimal::from(10)).unwrap()
    }

    #[test]
    fn test_config_from_params() {
        let mut params = HashMap::new();
        params.insert("fail_customers".to_string(), " A, ,C ".to_string());
        let config = MockSinkConfig::from_params(&params);
        assert_eq!(config.fail_customers.len(), 2);
        assert!(config.fail_customers.contains("A"));
        assert!(config.fail_customers.contains("C"));
        assert!(!config.unreachable);
        assert!(!config.fail_close);
    }

    #[tokio::test]
    async fn test_close_sets_shared_flag() {
        let mut sink = MockSink::accepting("mock");
        let closed = sink.closed_flag();

        sink.close().await.unwrap();
        assert!(closed.load(Ordering::SeqCst));
        assert!(sink.is_closed());
    }

    #[tokio::test]
    async fn test_fail_close() {
        let mut params = HashMap::new();
        params.insert("fail_close".to_string(), "true".to_string());
        let mut sink = MockSink::from_params("mock", &params);

        assert!(sink.close().await.is_err());
        assert!(!sink.is_closed());
    }

    #[tokio::test]
    async fn test_mock_sink_fails_configured_customers() {
        let mut sink = MockSink::new("mock", MockSinkConfig::failing(["B"]));
        let attempts = sink.attempts();

        assert!(sink.send(&invoice("A")).await.is_ok());
        let err = sink.send(&invoice("B")).await.unwrap_err();
        assert!(err.to_string().contains("'B' rejected"), "got: {err}");

        assert_eq!(attempts.snapshot(), vec![invoice("A"), invoice("B")]);
    }

    #[tokio::test]
    async fn test_unreachable_rejects_everything() {
        let mut params = HashMap::new();
        params.insert("unreachable".to_string(), "TRUE".to_string());
        let mut sink = MockSink::from_params("mock", &params);

        let err = sink.send(&invoice("A")).await.unwrap_err();
        assert!(matches!(err, ContractError::SinkConnection { .. }));
        assert_eq!(sink.attempts().len(), 1);
    }
}
