//! Database layer for the confectionery order book.
//!
//! Provides SQLite connection pooling (via `r2d2`), per-connection pragmas,
//! and creation of the three tables (`clients`, `desserts`, `orders`).
//!
//! # Design decisions
//!
//! - **Foreign keys off**: `orders.client_id` declares a reference to
//!   `clients`, but deleting a client must leave its orders in place, so
//!   enforcement is disabled on every connection.
//! - **Rollback journal by default**: data files stay in SQLite's default
//!   `DELETE` journal mode unless WAL is requested in settings.
//! - **Fixed schema**: the layout never changes after creation, so there is
//!   no migration tracking. The SQL is compiled in via `include_str!`.

mod pool;
mod schema;

pub use pool::{create_pool, DbPool, DbRuntimeSettings, JournalMode, PoolError};
pub use schema::{init_schema, missing_tables, SchemaError, TABLES};
