//! SQLite-backed key-value storage.
//!
//! Progress lives in a single row of the `kv` table, keyed by the configured
//! progress key. Each write runs in its own transaction, so readers never see
//! a partially written record.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use super::KvStorage;
use crate::error::DatabaseError;

/// SQLite database holding the `kv` table.
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// On-disk location, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        db.migrate()?;
        tracing::debug!(path = %path.display(), "opened progress database");
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn, path: None };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
    }

    /// Set a value in the kv store.
    ///
    /// The transaction rolls back when dropped without commit, so every
    /// early return leaves the previous value in place.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        tx.commit()
    }
}

impl KvStorage for Database {
    type Error = DatabaseError;

    fn read(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        Ok(self.kv_get(key)?)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        Ok(self.kv_set(key, value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "again").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "again");
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readtrack.db");
        {
            let db = Database::open(&path).unwrap();
            db.write("bibleProgress", r#"{"GEN":true}"#).unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.path(), Some(path.as_path()));
        assert_eq!(
            db.read("bibleProgress").unwrap().as_deref(),
            Some(r#"{"GEN":true}"#)
        );
    }

    #[test]
    fn open_fails_for_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Database::open(dir.path()).is_err());
    }
}
