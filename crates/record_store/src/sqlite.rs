//! SQLite record store
//!
//! One `invoice` table, rows returned in insertion order. Amounts are written as decimal
//! text; integer and real columns written by other tools are read back too. Columns that
//! cannot be read back as an invoice make the whole fetch fail as corrupted.

use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use contracts::{ContractError, Decimal, Invoice, InvoiceStore};
use rusqlite::types::Value;
use rusqlite::{params, Connection};
use tracing::{debug, info, instrument};

use crate::error::RecordStoreError;

const CREATE_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS invoice (customer TEXT NOT NULL, amount TEXT NOT NULL)";
const SELECT_ALL: &str = "SELECT rowid, customer, amount FROM invoice ORDER BY rowid";
const INSERT: &str = "INSERT INTO invoice (customer, amount) VALUES (?1, ?2)";
const DELETE_ALL: &str = "DELETE FROM invoice";

/// SQLite-backed invoice store
///
/// Statements run synchronously while the connection mutex is held.
pub struct SqliteInvoiceStore {
    name: String,
    conn: Mutex<Connection>,
}

impl SqliteInvoiceStore {
    /// Open (or create) a database file
    #[instrument(
        name = "sqlite_store_open",
        skip_all,
        fields(path = %path.as_ref().display())
    )]
    pub fn open(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, RecordStoreError> {
        let name = name.into();
        let conn =
            Connection::open(path.as_ref()).map_err(|e| RecordStoreError::sqlite(&name, e))?;
        let store = Self::with_connection(name, conn)?;
        info!(store = %store.name, "SQLite store opened");
        Ok(store)
    }

    /// Open a private in-memory database
    pub fn open_in_memory(name: impl Into<String>) -> Result<Self, RecordStoreError> {
        let name = name.into();
        let conn =
            Connection::open_in_memory().map_err(|e| RecordStoreError::sqlite(&name, e))?;
        Self::with_connection(name, conn)
    }

    fn with_connection(name: String, conn: Connection) -> Result<Self, RecordStoreError> {
        conn.execute(CREATE_TABLE, [])
            .map_err(|e| RecordStoreError::sqlite(&name, e))?;
        Ok(Self {
            name,
            conn: Mutex::new(conn),
        })
    }

    /// Append one invoice
    pub fn insert(&self, invoice: &Invoice) -> Result<(), RecordStoreError> {
        let conn = self.lock()?;
        conn.execute(
            INSERT,
            params![invoice.customer(), invoice.amount().to_string()],
        )
        .map_err(|e| RecordStoreError::sqlite(&self.name, e))?;
        Ok(())
    }

    /// Append invoices in one transaction, preserving their order
    pub fn insert_all<'a>(
        &self,
        invoices: impl IntoIterator<Item = &'a Invoice>,
    ) -> Result<usize, RecordStoreError> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| RecordStoreError::sqlite(&self.name, e))?;

        let mut inserted = 0usize;
        {
            let mut stmt = tx
                .prepare(INSERT)
                .map_err(|e| RecordStoreError::sqlite(&self.name, e))?;
            for invoice in invoices {
                stmt.execute(params![invoice.customer(), invoice.amount().to_string()])
                    .map_err(|e| RecordStoreError::sqlite(&self.name, e))?;
                inserted += 1;
            }
        }

        tx.commit()
            .map_err(|e| RecordStoreError::sqlite(&self.name, e))?;
        debug!(store = %self.name, inserted, "Invoices inserted");
        Ok(inserted)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, RecordStoreError> {
        self.conn
            .lock()
            .map_err(|_| RecordStoreError::poisoned(&self.name))
    }

    fn load_rows(&self) -> Result<Vec<(i64, Value, Value)>, RecordStoreError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(SELECT_ALL)
            .map_err(|e| RecordStoreError::sqlite(&self.name, e))?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .map_err(|e| RecordStoreError::sqlite(&self.name, e))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| RecordStoreError::sqlite(&self.name, e))
    }

    fn decode_row(
        &self,
        rowid: i64,
        customer: Value,
        amount: Value,
    ) -> Result<Invoice, RecordStoreError> {
        let corrupt = |message: String| RecordStoreError::CorruptRow {
            store: self.name.clone(),
            row: rowid,
            message,
        };

        let customer = match customer {
            Value::Text(text) => text,
            other => return Err(corrupt(format!("unexpected customer column {other:?}"))),
        };

        let amount = match amount {
            Value::Text(text) => Decimal::from_str(text.trim())
                .map_err(|e| corrupt(format!("amount '{text}' is not a decimal: {e}")))?,
            Value::Integer(i) => Decimal::from(i),
            Value::Real(f) => Decimal::try_from(f)
                .map_err(|e| corrupt(format!("amount {f} is not representable: {e}")))?,
            other => return Err(corrupt(format!("unexpected amount column {other:?}"))),
        };

        Invoice::new(customer, amount).map_err(|e| corrupt(e.to_string()))
    }
}

impl InvoiceStore for SqliteInvoiceStore {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "sqlite_store_fetch_all", skip(self), fields(store = %self.name))]
    async fn fetch_all(&self) -> Result<Vec<Invoice>, ContractError> {
        let rows = self.load_rows()?;
        let invoices = rows
            .into_iter()
            .map(|(rowid, customer, amount)| self.decode_row(rowid, customer, amount))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(store = %self.name, count = invoices.len(), "Fetched invoices");
        Ok(invoices)
    }

    #[instrument(name = "sqlite_store_reset", skip(self), fields(store = %self.name))]
    async fn reset(&self) -> Result<(), ContractError> {
        let conn = self.lock()?;
        let deleted = conn
            .execute(DELETE_ALL, [])
            .map_err(|e| RecordStoreError::sqlite(&self.name, e))?;
        info!(store = %self.name, deleted, "Store reset");
        Ok(())
    }
}
