use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::KeyValueStore;
use crate::error::{Result, SkinScanError};

/// SQLite-backed key-value store.
/// All operations are synchronous (rusqlite is blocking) and serialized
/// through one connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create or open the storage database at `db_path`.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SkinScanError::StorageWriteFailed(format!("Failed to create data dir: {}", e))
            })?;
        }

        let conn = Connection::open(db_path).map_err(|e| {
            SkinScanError::StorageReadFailed(format!("Failed to open storage db: {}", e))
        })?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )
        .map_err(|e| SkinScanError::StorageWriteFailed(format!("Failed to create table: {}", e)))?;

        info!("Opened storage database at {:?}", db_path);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.lock()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| SkinScanError::StorageReadFailed(format!("Failed to read '{}': {}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value],
            )
            .map_err(|e| {
                SkinScanError::StorageWriteFailed(format!("Failed to write '{}': {}", key, e))
            })?;
        debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(|e| {
                SkinScanError::StorageWriteFailed(format!("Failed to remove '{}': {}", key, e))
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (SqliteStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(&dir.path().join("nested").join("storage.db")).unwrap();
        (store, dir)
    }

    #[test]
    fn test_get_missing_key() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.get("scan_history").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites_whole_value() {
        let (store, _dir) = create_test_store();

        store.set("scan_history", "[1]").unwrap();
        store.set("scan_history", "[1,2]").unwrap();

        assert_eq!(store.get("scan_history").unwrap(), Some("[1,2]".to_string()));
    }

    #[test]
    fn test_remove() {
        let (store, _dir) = create_test_store();

        store.set("permissions", "{}").unwrap();
        store.remove("permissions").unwrap();
        assert_eq!(store.get("permissions").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.set("scan_history", r#"[{"id":"1"}]"#).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(
            store.get("scan_history").unwrap(),
            Some(r#"[{"id":"1"}]"#.to_string())
        );
    }
}
