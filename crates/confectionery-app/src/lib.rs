//! Startup plumbing and diagnostics commands for the confectionery order
//! book.
//!
//! The desktop front end and the `confectionery` binary share the same
//! startup sequence: load [`config::Config`], call [`init_tracing`], then
//! [`open_store`]. A failure to open the store is fatal.

pub mod config;

use std::io::Write;

use confectionery_store::{Store, StoreError};
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{DatabaseConfig, LoggingConfig};

/// Errors surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode row: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown command '{0}' (expected one of: summary, clients, desserts, orders, clear)")]
    UnknownCommand(String),
}

/// Installs the global `tracing` subscriber.
///
/// An invalid level filter falls back to `info`.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Opens the store described by `database`, creating and seeding the data
/// file on first use.
///
/// # Errors
///
/// Returns `StoreError` if the file cannot be opened or initialized.
pub fn open_store(database: &DatabaseConfig) -> Result<Store, StoreError> {
    Store::open(&database.path, database.runtime_settings())
}

/// Diagnostics commands understood by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Row counts per table.
    Summary,
    Clients,
    Desserts,
    Orders,
    /// Wipe every table and reset ID sequences.
    Clear,
}

impl std::str::FromStr for Command {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summary" => Ok(Self::Summary),
            "clients" => Ok(Self::Clients),
            "desserts" => Ok(Self::Desserts),
            "orders" => Ok(Self::Orders),
            "clear" => Ok(Self::Clear),
            other => Err(AppError::UnknownCommand(other.to_string())),
        }
    }
}

/// Runs `command` against `store`, writing its report to `out`.
///
/// Listings are written as one JSON object per line.
///
/// # Errors
///
/// Returns `AppError` if a store operation or the write fails.
pub fn run_command<W: Write>(store: &Store, command: Command, out: &mut W) -> Result<(), AppError> {
    match command {
        Command::Summary => {
            let counts = store.table_counts()?;
            writeln!(out, "clients: {}", counts.clients)?;
            writeln!(out, "desserts: {}", counts.desserts)?;
            writeln!(out, "orders: {}", counts.orders)?;
        }
        Command::Clients => write_rows(out, &store.list_clients()?)?,
        Command::Desserts => write_rows(out, &store.list_desserts()?)?,
        Command::Orders => write_rows(out, &store.list_orders()?)?,
        Command::Clear => {
            store.clear_all()?;
            writeln!(out, "all clients, desserts and orders removed")?;
        }
    }
    Ok(())
}

fn write_rows<W: Write, T: Serialize>(out: &mut W, rows: &[T]) -> Result<(), AppError> {
    for row in rows {
        serde_json::to_writer(&mut *out, row)?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!("summary".parse::<Command>().ok(), Some(Command::Summary));
        assert_eq!("orders".parse::<Command>().ok(), Some(Command::Orders));
        assert_eq!("clear".parse::<Command>().ok(), Some(Command::Clear));
    }

    #[test]
    fn rejects_unknown_command() {
        let err = "drop".parse::<Command>().expect_err("unknown command should fail");
        assert!(matches!(err, AppError::UnknownCommand(ref c) if c == "drop"));
    }
}
