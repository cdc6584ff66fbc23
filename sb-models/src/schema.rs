//! Database schema definitions and table creation.

use rusqlite::Connection;
use sb_core::error::{SbError, SbResult};
use tracing::debug;

/// Create all database tables if they do not exist.
pub fn create_tables(conn: &Connection) -> SbResult<()> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| SbError::Database(format!("failed to create schema: {e}")))?;
    debug!("database schema verified");
    Ok(())
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);
"#;
