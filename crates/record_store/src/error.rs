//! Record store error types

use contracts::ContractError;
use thiserror::Error;

/// Record store error
#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// SQLite call failed
    #[error("sqlite error in store '{store}': {source}")]
    Sqlite {
        /// Store name
        store: String,
        /// Underlying driver error
        #[source]
        source: rusqlite::Error,
    },

    /// A previous holder of the store lock panicked
    #[error("store '{store}' lock poisoned")]
    LockPoisoned {
        /// Store name
        store: String,
    },

    /// Store switched off (fault injection)
    #[error("store '{store}' is unavailable")]
    Unavailable {
        /// Store name
        store: String,
    },

    /// A persisted row cannot be read back as an invoice
    #[error("store '{store}' row {row}: {message}")]
    CorruptRow {
        /// Store name
        store: String,
        /// SQLite rowid
        row: i64,
        /// Error message
        message: String,
    },

    /// Wrapped ContractError
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl RecordStoreError {
    pub(crate) fn sqlite(store: &str, source: rusqlite::Error) -> Self {
        Self::Sqlite {
            store: store.to_string(),
            source,
        }
    }

    pub(crate) fn poisoned(store: &str) -> Self {
        Self::LockPoisoned {
            store: store.to_string(),
        }
    }
}

impl From<RecordStoreError> for ContractError {
    fn from(err: RecordStoreError) -> Self {
        match err {
            RecordStoreError::Sqlite { ref store, .. }
            | RecordStoreError::LockPoisoned { ref store }
            | RecordStoreError::Unavailable { ref store } => {
                ContractError::store_unavailable(store.clone(), err.to_string())
            }
            RecordStoreError::CorruptRow { ref store, .. } => {
                ContractError::store_corrupted(store.clone(), err.to_string())
            }
            RecordStoreError::Contract(inner) => inner,
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, RecordStoreError>;
