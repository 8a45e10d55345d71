//! SQLite-based store implementation

use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::{KvStore, StoreError, StoreResult};

/// SQLite-based key-value store
pub struct SqliteKvStore {
    conn: Mutex<Connection>,
}

impl SqliteKvStore {
    /// Open the database file at `path`, creating it and its table if needed
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    /// A private in-memory database, gone when the store is dropped
    pub fn in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )?;
        debug!("Document table ready");

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl KvStore for SqliteKvStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.lock()?;

        let value: Option<String> = conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |row| row.get(0))
            .optional()?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.lock()?;

        conn.execute(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key)
            DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
            params![key, value, keepstreak_util::now().to_rfc3339()],
        )?;

        debug!(key, bytes = value.len(), "Document written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM kv WHERE key = ?", [key])?;
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        match self.conn.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => {
                warn!("Store lock poisoned");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{load_document, save_document};

    #[test]
    fn test_in_memory_store() {
        let store = SqliteKvStore::in_memory().unwrap();
        assert!(store.is_healthy());
    }

    #[test]
    fn test_get_set_remove() {
        let store = SqliteKvStore::in_memory().unwrap();

        assert!(store.get("k").unwrap().is_none());

        store.set("k", "one").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("one"));

        // Whole-document replace
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));

        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());

        // Removing an absent key is fine
        store.remove("k").unwrap();
    }

    #[test]
    fn test_documents() {
        let store = SqliteKvStore::in_memory().unwrap();

        let loaded: Option<Vec<u32>> = load_document(&store, "numbers").unwrap();
        assert!(loaded.is_none());

        save_document(&store, "numbers", &vec![1u32, 2, 3]).unwrap();
        let loaded: Option<Vec<u32>> = load_document(&store, "numbers").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));

        store.set("numbers", "{not json").unwrap();
        let result: StoreResult<Option<Vec<u32>>> = load_document(&store, "numbers");
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keepstreak.db");

        {
            let store = SqliteKvStore::open(&path).unwrap();
            store.set("k", "v").unwrap();
        }

        let store = SqliteKvStore::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
