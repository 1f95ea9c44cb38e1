//! Schema creation for the confectionery data file.
//!
//! The layout is fixed: three tables created with `IF NOT EXISTS`, so files
//! written by earlier versions of the order book are adopted as they are.

use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;

/// Tables the order book stores its data in, in creation order.
pub const TABLES: [&str; 3] = ["clients", "desserts", "orders"];

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Errors that can occur while preparing the schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// `sqlite_master` could not be read.
    #[error("failed to inspect schema: {0}")]
    Inspect(rusqlite::Error),

    /// A `CREATE TABLE` statement failed.
    #[error("failed to create schema: {0}")]
    Create(rusqlite::Error),
}

/// Creates any of [`TABLES`] missing from the data file and returns the
/// names of the tables it created.
///
/// Existing tables and their rows are left untouched. An empty result means
/// the file already had the full schema. Creation is all-or-nothing.
///
/// # Errors
///
/// Returns `SchemaError` if the file cannot be inspected or a table cannot
/// be created.
pub fn init_schema(conn: &Connection) -> Result<Vec<&'static str>, SchemaError> {
    let missing = missing_tables(conn)?;
    if missing.is_empty() {
        tracing::debug!("schema already present");
        return Ok(missing);
    }

    let tx = conn.unchecked_transaction().map_err(SchemaError::Create)?;
    tx.execute_batch(SCHEMA_SQL).map_err(SchemaError::Create)?;
    tx.commit().map_err(SchemaError::Create)?;
    tracing::info!(tables = ?missing, "created tables");
    Ok(missing)
}

/// Returns the names from [`TABLES`] that do not exist yet.
///
/// # Errors
///
/// Returns `SchemaError::Inspect` if `sqlite_master` cannot be queried.
pub fn missing_tables(conn: &Connection) -> Result<Vec<&'static str>, SchemaError> {
    let mut stmt = conn
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")
        .map_err(SchemaError::Inspect)?;

    let mut missing = Vec::new();
    for table in TABLES {
        let found = stmt
            .query_row([table], |_| Ok(()))
            .optional()
            .map_err(SchemaError::Inspect)?;
        if found.is_none() {
            missing.push(table);
        }
    }
    Ok(missing)
}
