//! # Integration Tests
//!
//! End-to-end tests.
//!
//! Covers:
//! - Contract snapshot tests
//! - store -> filter -> dispatcher runs with memory, SQLite and file-backed stages

#[cfg(test)]
mod contract_tests {
    use contracts::{Decimal, DEFAULT_LOW_VALUE_THRESHOLD};

    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
        assert_eq!(DEFAULT_LOW_VALUE_THRESHOLD, Decimal::from(100));
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::Arc;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{Decimal, Invoice, InvoiceStore, SinkType};
    use dispatcher::{
        create_dispatcher, ConfiguredSink, InvoiceDispatcher, MockSink, MockSinkConfig,
    };
    use filter::InvoiceFilter;
    use record_store::{open_store, InMemoryInvoiceStore};

    fn invoice(customer: &str, amount: i64) -> Invoice {
        Invoice::new(customer, Decimal::from(amount)).unwrap()
    }

    fn scenario_store() -> Arc<InMemoryInvoiceStore> {
        Arc::new(InMemoryInvoiceStore::with_invoices(
            "ledger",
            vec![invoice("A", 50), invoice("B", 150), invoice("C", 99)],
        ))
    }

    /// (A,50), (B,150), (C,99) with an accepting sink: nothing fails, B is never sent
    #[tokio::test]
    async fn test_e2e_scenario_all_accepted() {
        let sink = MockSink::accepting("accounting");
        let attempts = sink.attempts();
        let mut dispatcher = InvoiceDispatcher::new(InvoiceFilter::new(scenario_store()), sink);

        let failed = dispatcher.dispatch_low_value_invoices().await.unwrap();
        dispatcher.shutdown().await;

        assert!(failed.is_empty());
        assert_eq!(attempts.snapshot(), vec![invoice("A", 50), invoice("C", 99)]);
        assert!(attempts.snapshot().iter().all(|i| i.customer() != "B"));
    }

    #[tokio::test]
    async fn test_e2e_scenario_sink_rejects_a_and_c() {
        let sink = MockSink::new("accounting", MockSinkConfig::failing(["A", "C"]));
        let attempts = sink.attempts();
        let mut dispatcher = InvoiceDispatcher::new(InvoiceFilter::new(scenario_store()), sink);

        let failed = dispatcher.dispatch_low_value_invoices().await.unwrap();

        assert_eq!(failed, vec![invoice("A", 50), invoice("C", 99)]);
        assert_eq!(attempts.len(), 2);
    }

    #[tokio::test]
    async fn test_e2e_store_outage_aborts_run() {
        let store = scenario_store();
        store.set_unavailable(true);
        let sink = MockSink::accepting("accounting");
        let attempts = sink.attempts();
        let mut dispatcher = InvoiceDispatcher::new(InvoiceFilter::new(store), sink);

        let err = dispatcher.dispatch_low_value_invoices().await.unwrap_err();

        assert!(err.is_store_failure(), "got: {err}");
        assert!(attempts.is_empty());
    }

    #[tokio::test]
    async fn test_e2e_reset_then_dispatch_is_empty() {
        let store = scenario_store();
        store.reset().await.unwrap();
        let sink = MockSink::accepting("accounting");
        let attempts = sink.attempts();
        let mut dispatcher = InvoiceDispatcher::new(InvoiceFilter::new(store), sink);

        assert!(dispatcher.dispatch_low_value_invoices().await.unwrap().is_empty());
        assert!(attempts.is_empty());
    }

    /// Failed invoices can be fed back through a healthy sink by the caller
    #[tokio::test]
    async fn test_e2e_failures_resubmitted() {
        let failing = MockSink::new("accounting", MockSinkConfig::failing(["C"]));
        let mut first = InvoiceDispatcher::new(InvoiceFilter::new(scenario_store()), failing);
        let failed = first.dispatch_low_value_invoices().await.unwrap();
        assert_eq!(failed, vec![invoice("C", 99)]);

        let healthy = MockSink::accepting("accounting");
        let attempts = healthy.attempts();
        let mut second = InvoiceDispatcher::new(InvoiceFilter::new(scenario_store()), healthy);
        let report = second.dispatch_batch(failed).await;

        assert!(report.is_clean());
        assert_eq!(attempts.snapshot(), vec![invoice("C", 99)]);
    }

    /// TOML config -> SQLite store -> filter -> file sink
    #[tokio::test]
    async fn test_e2e_sqlite_to_file_sink_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("invoices.db");
        let outbox = dir.path().join("outbox").join("invoices.jsonl");

        let content = format!(
            r#"
[store]
store_type = "sqlite"
path = "{db}"
seed = [
    {{ customer = "A", amount = "50" }},
    {{ customer = "B", amount = "150" }},
    {{ customer = "C", amount = "99.99" }},
]

[filter]
threshold = "100"

[sink]
name = "accounting"
sink_type = "file"
[sink.params]
path = "{outbox}"
"#,
            db = db.display(),
            outbox = outbox.display(),
        );
        let blueprint = ConfigLoader::load_from_str(&content, ConfigFormat::Toml).unwrap();

        let store = open_store(&blueprint.store).unwrap();
        assert!(store.fetch_all().await.unwrap().is_empty(), "sqlite is not auto-seeded");
        store.insert_all(&blueprint.store.seed).unwrap();

        let mut dispatcher = create_dispatcher(Arc::new(store), &blueprint).unwrap();
        assert!(matches!(dispatcher.sink(), ConfiguredSink::File(_)));
        assert_eq!(dispatcher.sink().sink_type(), SinkType::File);

        let failed = dispatcher.dispatch_low_value_invoices().await.unwrap();
        dispatcher.shutdown().await;
        assert!(failed.is_empty());

        let lines: Vec<serde_json::Value> = std::fs::read_to_string(&outbox)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["customer"], "A");
        assert_eq!(lines[1]["customer"], "C");
        assert_eq!(lines[1]["amount"], "99.99");
    }

    /// Memory store seeded from config with a scripted mock sink
    #[tokio::test]
    async fn test_e2e_memory_store_with_mock_sink_from_config() {
        let content = r#"
[store]
seed = [
    { customer = "A", amount = 50 },
    { customer = "B", amount = 150 },
    { customer = "C", amount = 99 },
]

[sink]
name = "rehearsal"
sink_type = "mock"
[sink.params]
fail_customers = "A"
"#;
        let blueprint = ConfigLoader::load_from_str(content, ConfigFormat::Toml).unwrap();
        let store = Arc::new(open_store(&blueprint.store).unwrap());

        let mut dispatcher = create_dispatcher(store, &blueprint).unwrap();
        let report = dispatcher.dispatch_low_value_report().await.unwrap();

        assert_eq!(report.attempted(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failed_amount(), Decimal::from(50));
        assert_eq!(report.into_failed(), vec![invoice("A", 50)]);
    }
}
