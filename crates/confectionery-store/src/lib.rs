//! Data store for the confectionery order book.
//!
//! Owns the SQLite data file holding clients, desserts, and orders. A
//! [`Store`] is opened once at startup: it creates the schema if needed and
//! seeds sample rows the first time it sees an empty file. After that it
//! exposes one list/get/add/update/delete operation per table, each running
//! a single statement on its own pooled connection.
//!
//! The connection-level functions are also exported for callers that manage
//! their own [`rusqlite::Connection`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use confectionery_db::DbRuntimeSettings;
//! use confectionery_store::Store;
//! use confectionery_types::NewClient;
//!
//! let store = Store::open("confectionery.db", DbRuntimeSettings::default())?;
//! let client = NewClient::from_form("Иванов Иван", "+79160000000", None, "")?;
//! let id = store.add_client(&client)?;
//! ```

mod clients;
mod desserts;
mod error;
mod maintenance;
mod orders;
mod seed;
mod store;

pub use clients::{add_client, delete_client, get_client, list_clients, update_client};
pub use desserts::{add_dessert, delete_dessert, get_dessert, list_desserts, update_dessert};
pub use error::StoreError;
pub use maintenance::{clear_all, table_counts};
pub use orders::{add_order, delete_order, get_order, list_orders};
pub use store::Store;
