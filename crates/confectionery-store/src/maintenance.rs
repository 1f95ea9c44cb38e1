//! Diagnostics and debug-only maintenance.

use confectionery_types::TableCounts;
use rusqlite::Connection;

use crate::error::StoreError;

/// Returns the row count of each table.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure.
pub fn table_counts(conn: &Connection) -> Result<TableCounts, StoreError> {
    let count = |table: &str| -> Result<usize, StoreError> {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?)
    };

    Ok(TableCounts {
        clients: count("clients")?,
        desserts: count("desserts")?,
        orders: count("orders")?,
    })
}

/// Deletes every row from all three tables and resets their ID sequences,
/// so the next insert into each table gets ID 1.
///
/// Intended for tests and debugging; not a user action.
///
/// # Errors
///
/// Returns `StoreError::Database` on SQL failure. Nothing is deleted in
/// that case.
pub fn clear_all(conn: &Connection) -> Result<(), StoreError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "DELETE FROM orders;
         DELETE FROM desserts;
         DELETE FROM clients;
         DELETE FROM sqlite_sequence WHERE name IN ('clients', 'desserts', 'orders');",
    )?;
    tx.commit()?;

    tracing::warn!("cleared all clients, desserts and orders");
    Ok(())
}
