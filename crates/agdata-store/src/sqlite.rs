use std::path::Path;

use agdata_types::{Record, RecordId};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row, TransactionBehavior};

use crate::config::SqliteStoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::traits::RecordStore;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS Records (
        Id INTEGER PRIMARY KEY AUTOINCREMENT,
        Name TEXT NOT NULL,
        Address TEXT NOT NULL
    );

    CREATE UNIQUE INDEX IF NOT EXISTS idx_Records_Name ON Records (Name);
";

const SELECT_COLUMNS: &str = "SELECT Id, Name, Address FROM Records";

/// Durable record store backed by a single SQLite file.
///
/// The store holds only its configuration. Each operation opens its own
/// connection and drops it on return, success or failure; nothing is pooled
/// and no connection spans two operations. Concurrent writers are arbitrated
/// by SQLite's locking and the configured busy timeout.
#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    config: SqliteStoreConfig,
}

impl SqliteRecordStore {
    /// Open the store, creating the database file, the `Records` table and
    /// its unique name index if they are absent.
    pub fn open(config: SqliteStoreConfig) -> StoreResult<Self> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let store = Self { config };
        store.initialize_schema()?;
        Ok(store)
    }

    pub fn config(&self) -> &SqliteStoreConfig {
        &self.config
    }

    fn initialize_schema(&self) -> StoreResult<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| StoreError::from_sqlite("create schema", e))?;
        tracing::info!(path = %self.config.path.display(), "record schema ready");
        Ok(())
    }

    fn connect(&self) -> StoreResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&self.config.path, flags).map_err(|e| {
            StoreError::Unavailable(format!("open {}: {e}", self.config.path.display()))
        })?;
        conn.busy_timeout(self.config.busy_timeout())
            .map_err(|e| StoreError::Unavailable(format!("busy timeout: {e}")))?;
        conn.execute_batch(&format!(
            "PRAGMA journal_mode = {};",
            self.config.journal_mode.pragma_value()
        ))
        .map_err(|e| StoreError::from_sqlite("journal mode", e))?;
        Ok(conn)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: RecordId::new(row.get(0)?),
        name: row.get(1)?,
        address: row.get(2)?,
    })
}

fn validate_store_path(path: &Path) -> StoreResult<()> {
    if path.as_os_str().is_empty() {
        return Err(StoreError::InvalidConfig(
            "database path must not be empty".into(),
        ));
    }
    if path.as_os_str() == ":memory:" {
        return Err(StoreError::InvalidConfig(
            "in-memory databases do not survive per-operation connections".into(),
        ));
    }
    if path.is_dir() {
        return Err(StoreError::InvalidConfig(format!(
            "database path is a directory: {}",
            path.display()
        )));
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> StoreResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

impl RecordStore for SqliteRecordStore {
    fn add(&self, record: &Record) -> StoreResult<RecordId> {
        record.validate()?;
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO Records (Name, Address) VALUES (?1, ?2)",
            params![record.name, record.address],
        )
        .map_err(|e| StoreError::from_sqlite("error inserting record", e))?;
        let id = RecordId::new(conn.last_insert_rowid());
        tracing::debug!(%id, name = %record.name, "record inserted");
        Ok(id)
    }

    fn update(&self, record: &Record) -> StoreResult<bool> {
        record.validate()?;
        let mut conn = self.connect()?;
        // IMMEDIATE takes the write lock up front so the id check and the
        // write see the same state.
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| StoreError::from_sqlite("begin update", e))?;
        let present: Option<i64> = tx
            .query_row(
                "SELECT Id FROM Records WHERE Id = ?1",
                params![record.id.get()],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::from_sqlite("error updating record", e))?;
        if present.is_none() {
            return Err(StoreError::NotFound(record.id));
        }
        let changed = tx
            .execute(
                "UPDATE Records SET Name = ?1, Address = ?2 WHERE Id = ?3",
                params![record.name, record.address, record.id.get()],
            )
            .map_err(|e| StoreError::from_sqlite("error updating record", e))?;
        tx.commit()
            .map_err(|e| StoreError::from_sqlite("commit update", e))?;
        tracing::debug!(id = %record.id, changed, "record updated");
        Ok(changed > 0)
    }

    fn delete(&self, name: &str) -> StoreResult<bool> {
        let conn = self.connect()?;
        let removed = conn
            .execute("DELETE FROM Records WHERE Name = ?1", params![name])
            .map_err(|e| StoreError::from_sqlite("error deleting record", e))?;
        tracing::debug!(name, removed, "record delete");
        Ok(removed > 0)
    }

    fn get(&self, name: &str) -> StoreResult<Option<Record>> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("{SELECT_COLUMNS} WHERE Name = ?1"),
            params![name],
            row_to_record,
        )
        .optional()
        .map_err(|e| StoreError::from_sqlite("get record by name", e))
    }

    fn get_by_id(&self, id: RecordId) -> StoreResult<Option<Record>> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("{SELECT_COLUMNS} WHERE Id = ?1"),
            params![id.get()],
            row_to_record,
        )
        .optional()
        .map_err(|e| StoreError::from_sqlite("get record by id", e))
    }

    fn get_all(&self) -> StoreResult<Vec<Record>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY Id"))
            .map_err(|e| StoreError::from_sqlite("list records", e))?;
        let rows = stmt
            .query_map([], row_to_record)
            .map_err(|e| StoreError::from_sqlite("list records", e))?;
        let records = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| StoreError::from_sqlite("list records", e))?;
        Ok(records)
    }

    fn exists(&self, name: &str) -> StoreResult<bool> {
        let conn = self.connect()?;
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM Records WHERE Name = ?1",
                params![name],
                |row| row.get(0),
            )
            .map_err(|e| StoreError::from_sqlite("check record exists", e))?;
        Ok(count > 0)
    }

    fn count(&self) -> StoreResult<u64> {
        let conn = self.connect()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM Records", [], |row| row.get(0))
            .map_err(|e| StoreError::from_sqlite("count records", e))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
