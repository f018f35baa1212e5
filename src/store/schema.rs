//! # Database Schema Module
//!
//! Creates the `postings` table and its indexes. Every statement is idempotent, so
//! the schema is simply re-applied whenever a database is opened.

use crate::store::error::DbError;
use libsql::{Connection, params};

/// Initialize the database schema
pub async fn initialize_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS postings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(100) NOT NULL,
            url VARCHAR(100) NOT NULL UNIQUE,
            seniority VARCHAR(15) NOT NULL,
            tags VARCHAR(100) NOT NULL DEFAULT '[]',
            scraped_on INTEGER NOT NULL
        )",
        params![],
    )
    .await
    .map_err(|e| DbError::Schema(format!("Failed to create postings table: {}", e)))?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_postings_name ON postings(name)",
        params![],
    )
    .await
    .map_err(|e| DbError::Schema(format!("Failed to create index on postings name: {}", e)))?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_postings_seniority ON postings(seniority)",
        params![],
    )
    .await
    .map_err(|e| {
        DbError::Schema(format!("Failed to create index on postings seniority: {}", e))
    })?;

    Ok(())
}
