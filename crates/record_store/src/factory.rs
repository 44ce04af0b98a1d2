//! Store construction from configuration

use contracts::{ContractError, Invoice, InvoiceStore, StoreConfig, StoreType};
use tracing::{info, instrument};

use crate::error::RecordStoreError;
use crate::memory::InMemoryInvoiceStore;
use crate::sqlite::SqliteInvoiceStore;

/// Name used in logs and errors for configured stores
pub const DEFAULT_STORE_NAME: &str = "invoices";

/// Store selected by configuration
pub enum ConfiguredStore {
    /// Process-local store, seeded on open
    Memory(InMemoryInvoiceStore),
    /// SQLite database file
    Sqlite(SqliteInvoiceStore),
}

impl ConfiguredStore {
    /// Append invoices, preserving their order
    pub fn insert_all(&self, invoices: &[Invoice]) -> Result<usize, RecordStoreError> {
        match self {
            Self::Memory(store) => store.insert_all(invoices.iter().cloned()),
            Self::Sqlite(store) => store.insert_all(invoices),
        }
    }

    /// Backend kind
    pub fn store_type(&self) -> StoreType {
        match self {
            Self::Memory(_) => StoreType::Memory,
            Self::Sqlite(_) => StoreType::Sqlite,
        }
    }
}

/// Open the store described by `config`
///
/// Memory stores start with the configured seed invoices; SQLite stores open the file
/// as-is (use `insert_all` to seed them).
#[instrument(name = "record_store_open", skip(config), fields(store_type = ?config.store_type))]
pub fn open_store(config: &StoreConfig) -> Result<ConfiguredStore, RecordStoreError> {
    match config.store_type {
        StoreType::Memory => {
            let store =
                InMemoryInvoiceStore::with_invoices(DEFAULT_STORE_NAME, config.seed.clone());
            info!(seeded = config.seed.len(), "Memory store ready");
            Ok(ConfiguredStore::Memory(store))
        }
        StoreType::Sqlite => {
            let path = config.path.as_ref().ok_or_else(|| {
                ContractError::config_validation("store.path", "sqlite store requires a path")
            })?;
            let store = SqliteInvoiceStore::open(DEFAULT_STORE_NAME, path)?;
            Ok(ConfiguredStore::Sqlite(store))
        }
    }
}

impl InvoiceStore for ConfiguredStore {
    fn name(&self) -> &str {
        match self {
            Self::Memory(store) => store.name(),
            Self::Sqlite(store) => store.name(),
        }
    }

    async fn fetch_all(&self) -> Result<Vec<Invoice>, ContractError> {
        match self {
            Self::Memory(store) => store.fetch_all().await,
            Self::Sqlite(store) => store.fetch_all().await,
        }
    }

    async fn reset(&self) -> Result<(), ContractError> {
        match self {
            Self::Memory(store) => store.reset().await,
            Self::Sqlite(store) => store.reset().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Decimal;
    use tempfile::tempdir;

    fn seed() -> Vec<Invoice> {
        vec![
            Invoice::new("A", Decimal::from(50)).unwrap(),
            Invoice::new("B", Decimal::from(150)).unwrap(),
        ]
    }

    #[tokio::test]
    async fn test_memory_store_is_seeded() {
        let config = StoreConfig {
            store_type: StoreType::Memory,
            path: None,
            seed: seed(),
        };
        let store = open_store(&config).unwrap();
        assert_eq!(store.store_type(), StoreType::Memory);
        assert_eq!(store.fetch_all().await.unwrap(), seed());
    }

    #[tokio::test]
    async fn test_sqlite_store_is_not_auto_seeded() {
        let dir = tempdir().unwrap();
        let config = StoreConfig {
            store_type: StoreType::Sqlite,
            path: Some(dir.path().join("invoices.db")),
            seed: seed(),
        };
        let store = open_store(&config).unwrap();
        assert!(store.fetch_all().await.unwrap().is_empty());

        assert_eq!(store.insert_all(&config.seed).unwrap(), 2);
        assert_eq!(store.fetch_all().await.unwrap(), seed());
    }

    #[test]
    fn test_sqlite_without_path_fails() {
        let config = StoreConfig {
            store_type: StoreType::Sqlite,
            path: None,
            seed: Vec::new(),
        };
        assert!(matches!(
            open_store(&config),
            Err(RecordStoreError::Contract(ContractError::ConfigValidation { .. }))
        ));
    }
}
