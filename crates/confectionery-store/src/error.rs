//! Error types for the store.

use confectionery_db::{PoolError, SchemaError};
use rusqlite::ErrorCode;

const UNIQUE_PREFIX: &str = "UNIQUE constraint failed: ";

/// Errors that can occur during store operations.
///
/// [`StoreError::Duplicate`] is a user-facing validation failure; every
/// other variant means the data file is unusable and is fatal to the
/// caller.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The connection pool could not be created.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// No connection could be checked out of the pool.
    #[error("failed to acquire database connection: {0}")]
    Connection(#[from] r2d2::Error),

    /// The schema could not be created.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A write collided with a unique column.
    #[error("a row with this {column} already exists in {table}")]
    Duplicate {
        /// Table holding the unique column.
        table: String,
        /// The unique column, e.g. `phone` or `name`.
        column: String,
    },

    /// Any other SQLite failure.
    #[error("store database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    /// Returns `false` for constraint violations the user can correct.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Duplicate { .. } => false,
            Self::Database(rusqlite::Error::SqliteFailure(err, _)) => {
                err.code != ErrorCode::ConstraintViolation
            }
            _ => true,
        }
    }
}

/// Maps a failed write, turning unique violations into
/// [`StoreError::Duplicate`].
pub(crate) fn classify_write(err: rusqlite::Error) -> StoreError {
    match unique_target(&err) {
        Some((table, column)) => StoreError::Duplicate { table, column },
        None => StoreError::Database(err),
    }
}

/// Extracts `(table, column)` from SQLite's
/// `UNIQUE constraint failed: table.column` message.
fn unique_target(err: &rusqlite::Error) -> Option<(String, String)> {
    let rusqlite::Error::SqliteFailure(failure, Some(message)) = err else {
        return None;
    };
    if failure.code != ErrorCode::ConstraintViolation {
        return None;
    }

    let target = message.strip_prefix(UNIQUE_PREFIX)?;
    let first = target.split(',').next()?.trim();
    let (table, column) = first.split_once('.')?;
    Some((table.to_string(), column.to_string()))
}
