//! Connection pool creation and configuration.

use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use serde::Deserialize;
use thiserror::Error;

/// SQLite journal mode applied to every pooled connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    /// SQLite's default rollback journal.
    #[default]
    Delete,
    /// Write-ahead logging.
    Wal,
}

impl JournalMode {
    /// Returns the pragma value for this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Wal => "wal",
        }
    }
}

/// Runtime tunables for SQLite connection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbRuntimeSettings {
    /// Busy timeout for SQLite connections, in milliseconds.
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled SQLite connections.
    pub pool_max_size: u32,

    /// How long pool creation and checkout wait for a connection, in
    /// milliseconds.
    pub connection_timeout_ms: u64,

    /// Journal mode set when a connection is opened.
    pub journal_mode: JournalMode,
}

impl Default for DbRuntimeSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5_000,
            pool_max_size: 2,
            connection_timeout_ms: 5_000,
            journal_mode: JournalMode::default(),
        }
    }
}

/// A type alias for the SQLite connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Errors that can occur when creating the database pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Failed to build the connection pool.
    #[error("failed to create database connection pool: {0}")]
    PoolInit(#[from] r2d2::Error),
}

/// Creates a new SQLite connection pool for the given data file.
///
/// The file is created if absent. Each connection gets the configured
/// journal mode and busy timeout, with foreign key enforcement off.
///
/// # Arguments
///
/// * `db_path` - Path to the SQLite database file. `:memory:` is accepted,
///   but every pooled connection then sees its own empty database.
///
/// # Errors
///
/// Returns `PoolError::PoolInit` if the connection pool cannot be created,
/// which includes the file being unopenable.
pub fn create_pool(db_path: &str, settings: DbRuntimeSettings) -> Result<DbPool, PoolError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;

    let manager = SqliteConnectionManager::file(db_path)
        .with_flags(flags)
        .with_init(move |conn| {
            let requested = settings.journal_mode.as_str();
            let journal_mode: String = conn.query_row(
                &format!("PRAGMA journal_mode = {requested};"),
                [],
                |row| row.get(0),
            )?;
            // In-memory databases always report "memory".
            if !journal_mode.eq_ignore_ascii_case(requested) && journal_mode != "memory" {
                return Err(rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
                    Some(format!(
                        "failed to set {requested} journal mode, got: {journal_mode}"
                    )),
                ));
            }
            conn.execute_batch(&format!(
                "PRAGMA foreign_keys = OFF;
                 PRAGMA busy_timeout = {};",
                settings.busy_timeout_ms
            ))
        });

    let pool = Pool::builder()
        .max_size(settings.pool_max_size)
        .connection_timeout(Duration::from_millis(settings.connection_timeout_ms))
        .build(manager)?;

    tracing::debug!(
        path = db_path,
        journal_mode = settings.journal_mode.as_str(),
        pool_max_size = settings.pool_max_size,
        "opened database pool"
    );

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_file_pool_applies_settings() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("pool.db");
        let settings = DbRuntimeSettings {
            busy_timeout_ms: 2_500,
            pool_max_size: 3,
            connection_timeout_ms: 1_000,
            journal_mode: JournalMode::Wal,
        };

        let pool = create_pool(path.to_str().expect("utf-8 path"), settings)
            .expect("pool creation should succeed");
        let conn = pool.get().expect("should get a connection");

        let mode: String = conn
            .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
            .expect("should query journal_mode");
        assert_eq!(mode, "wal");

        // Orphaned client references are allowed.
        let fk: i32 = conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .expect("should query foreign_keys");
        assert_eq!(fk, 0, "foreign keys should be disabled");

        let busy_timeout: i32 = conn
            .query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
            .expect("should query busy_timeout");
        assert_eq!(busy_timeout, 2_500, "busy timeout should match settings");

        assert_eq!(pool.max_size(), 3, "pool max size should match settings");
        assert!(path.exists(), "data file should be created");
    }

    #[test]
    fn default_settings_keep_rollback_journal() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("default.db");

        let pool = create_pool(path.to_str().expect("utf-8 path"), DbRuntimeSettings::default())
            .expect("pool creation should succeed");
        let conn = pool.get().expect("should get a connection");

        let mode: String = conn
            .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
            .expect("should query journal_mode");
        assert_eq!(mode, "delete");
    }

    #[test]
    fn unopenable_path_fails_pool_creation() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("missing").join("nested").join("x.db");

        let settings = DbRuntimeSettings {
            connection_timeout_ms: 200,
            ..DbRuntimeSettings::default()
        };

        let result = create_pool(path.to_str().expect("utf-8 path"), settings);
        assert!(
            matches!(result, Err(PoolError::PoolInit(_))),
            "pool creation should fail for a missing directory"
        );
    }
}
