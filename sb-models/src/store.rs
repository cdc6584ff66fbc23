//! Durable key-value storage.
//!
//! The client persists a handful of string entries (session token, identity
//! snapshot, a few UI scratch values). `KeyValueStore` is the seam; the
//! SQLite implementation is used in the application and the in-memory one in
//! tests and throwaway runs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection};

use sb_core::error::{SbError, SbResult};

use crate::db::Database;

/// String key-value storage with atomic multi-key writes.
pub trait KeyValueStore: Send + Sync {
    /// Get the value for a key.
    fn get(&self, key: &str) -> SbResult<Option<String>>;

    /// Set a value (upsert).
    fn set(&self, key: &str, value: &str) -> SbResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> SbResult<()>;

    /// Set several entries as one unit: either all are written or none.
    fn set_many(&self, entries: &[(&str, &str)]) -> SbResult<()>;

    /// Remove several keys as one unit.
    fn remove_many(&self, keys: &[&str]) -> SbResult<()>;
}

/// Shared handle to any key-value store.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// SQLite-backed store on the `kv_store` table.
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn upsert(conn: &Connection, key: &str, value: &str) -> SbResult<()> {
        conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(|e| SbError::Database(e.to_string()))?;
        Ok(())
    }

    fn delete(conn: &Connection, key: &str) -> SbResult<()> {
        conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])
            .map_err(|e| SbError::Database(e.to_string()))?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> SbResult<Option<String>> {
        let conn = self.db.conn()?;
        match conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            [key],
            |row| row.get::<_, String>(0),
        ) {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(SbError::Database(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> SbResult<()> {
        let conn = self.db.conn()?;
        Self::upsert(&conn, key, value)
    }

    fn remove(&self, key: &str) -> SbResult<()> {
        let conn = self.db.conn()?;
        Self::delete(&conn, key)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> SbResult<()> {
        self.db.transaction(|conn| {
            for (key, value) in entries {
                Self::upsert(conn, key, value)?;
            }
            Ok(())
        })
    }

    fn remove_many(&self, keys: &[&str]) -> SbResult<()> {
        self.db.transaction(|conn| {
            for key in keys {
                Self::delete(conn, key)?;
            }
            Ok(())
        })
    }
}

/// Process-local store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> SbResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| SbError::Storage("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> SbResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> SbResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> SbResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> SbResult<()> {
        let mut guard = self.lock()?;
        for (key, value) in entries {
            guard.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> SbResult<()> {
        let mut guard = self.lock()?;
        for key in keys {
            guard.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_core::config::StorageConfig;
    use tempfile::TempDir;

    fn sqlite_store() -> (SqliteStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let db = Database::init(&dir.path().join("kv.db"), &StorageConfig::default()).unwrap();
        (SqliteStore::new(db), dir)
    }

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("missing").unwrap(), None);

        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));

        store.set_many(&[("b", "x"), ("c", "y")]).unwrap();
        assert_eq!(store.get("b").unwrap().as_deref(), Some("x"));
        assert_eq!(store.get("c").unwrap().as_deref(), Some("y"));

        store.remove_many(&["b", "c", "never-set"]).unwrap();
        assert_eq!(store.get("b").unwrap(), None);
        assert_eq!(store.get("c").unwrap(), None);

        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_sqlite_store() {
        let (store, _dir) = sqlite_store();
        exercise(&store);
    }

    #[test]
    fn test_sqlite_store_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kv.db");
        {
            let db = Database::init(&path, &StorageConfig::default()).unwrap();
            SqliteStore::new(db).set("k", "v").unwrap();
        }
        let db = Database::init(&path, &StorageConfig::default()).unwrap();
        assert_eq!(SqliteStore::new(db).get("k").unwrap().as_deref(), Some("v"));
    }
}
