//! SQLite-backed key-value store
//!
//! One table, `kv_store(key TEXT PRIMARY KEY, value TEXT)`, in
//! `<data_dir>/valuables.db`. Survives process restarts.

use super::KeyValueStore;
use crate::error::{CoreError, StoreError};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Database file name inside the data directory
pub const DATABASE_FILE: &str = "valuables.db";

/// Default data directory, `<platform data dir>/valuables`
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("valuables"))
}

/// Durable store (thread-safe)
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Create or open the store database in `data_dir`
    pub fn open(data_dir: &Path) -> Result<Self, CoreError> {
        std::fs::create_dir_all(data_dir).map_err(|e| CoreError::StoreOpen {
            path: data_dir.to_path_buf(),
            message: format!("Failed to create data directory: {}", e),
        })?;

        let db_path = data_dir.join(DATABASE_FILE);
        let open_err = |message: String| CoreError::StoreOpen {
            path: db_path.clone(),
            message,
        };

        let conn = Connection::open(&db_path).map_err(|e| open_err(e.to_string()))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| open_err(format!("Failed to enable WAL mode: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| open_err(format!("Failed to create schema: {}", e)))?;

        debug!(path = %db_path.display(), "SQLite store opened");

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&*conn)?)
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM kv_store WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?, ?)",
                params![key, value],
            )
            .map(|_| ())
        })
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv_store WHERE key = ?", params![key])
                .map(|_| ())
        })
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| conn.execute("DELETE FROM kv_store", []).map(|_| ()))?;
        debug!(path = %self.db_path.display(), "SQLite store cleared");
        Ok(())
    }
}
