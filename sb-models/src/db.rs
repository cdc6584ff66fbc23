//! Database initialization, connection pooling, and transactions.
//!
//! Uses SQLite (WAL mode by default) with r2d2 connection pooling. The
//! database only holds the client's small key-value table.

use std::path::Path;
use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::info;

use sb_core::config::StorageConfig;
use sb_core::error::{SbError, SbResult};

use crate::schema;

/// Type alias for the SQLite connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Database wrapper providing initialization, pooling, and transactions.
#[derive(Clone)]
pub struct Database {
    pool: Arc<DbPool>,
}

impl Database {
    /// Initialize the database at the given path.
    ///
    /// Creates parent directories, sets up the pool with the configured
    /// pragmas, and creates the schema if it does not exist yet.
    pub fn init(db_path: &Path, config: &StorageConfig) -> SbResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("initializing database at {}", db_path.display());

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(config.pool_size.max(1))
            .connection_customizer(Box::new(ConnectionCustomizer {
                wal_mode: config.wal_mode,
            }))
            .build(manager)
            .map_err(|e| SbError::Pool(e.to_string()))?;

        let db = Self {
            pool: Arc::new(pool),
        };

        {
            let conn = db.conn()?;
            schema::create_tables(&conn)?;
        }

        Ok(db)
    }

    /// Get a connection from the pool.
    pub fn conn(&self) -> SbResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| SbError::Pool(e.to_string()))
    }

    /// Execute a function within a database transaction.
    ///
    /// The transaction is rolled back if `f` returns an error.
    pub fn transaction<T, F>(&self, f: F) -> SbResult<T>
    where
        F: FnOnce(&Connection) -> SbResult<T>,
    {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| SbError::Database(e.to_string()))?;

        let result = f(&tx)?;

        tx.commit().map_err(|e| SbError::Database(e.to_string()))?;

        Ok(result)
    }
}

/// r2d2 connection customizer that applies PRAGMA settings.
#[derive(Debug)]
struct ConnectionCustomizer {
    wal_mode: bool,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        if self.wal_mode {
            conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        }

        conn.execute_batch(
            "PRAGMA synchronous=NORMAL;
             PRAGMA busy_timeout=5000;",
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_db() -> (Database, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("test.db");
        let db = Database::init(&path, &StorageConfig::default()).unwrap();
        (db, dir)
    }

    #[test]
    fn test_database_init_creates_schema() {
        let (db, _dir) = test_db();
        let conn = db.conn().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_transaction_commits() {
        let (db, _dir) = test_db();
        let result = db.transaction(|conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value) VALUES (?1, ?2)",
                rusqlite::params!["a", "1"],
            )
            .map_err(|e| SbError::Database(e.to_string()))?;
            Ok(42)
        });
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let (db, _dir) = test_db();
        let result: SbResult<()> = db.transaction(|conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value) VALUES (?1, ?2)",
                rusqlite::params!["a", "1"],
            )
            .map_err(|e| SbError::Database(e.to_string()))?;
            Err(SbError::Internal("boom".into()))
        });
        assert!(result.is_err());

        let conn = db.conn().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
