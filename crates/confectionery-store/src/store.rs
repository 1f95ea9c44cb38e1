//! The [`Store`] handle owned by the application.

use confectionery_db::{create_pool, init_schema, DbPool, DbRuntimeSettings};
use confectionery_types::{
    Client, Dessert, NewClient, NewDessert, NewOrder, OrderView, TableCounts,
};
use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;

use crate::error::StoreError;
use crate::{clients, desserts, maintenance, orders, seed};

/// Handle to the confectionery data file.
///
/// Every operation checks a connection out of the pool for the duration of
/// one call and returns it on every exit path.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("pool_max_size", &self.pool.max_size())
            .finish()
    }
}

impl Store {
    /// Opens (creating if absent) the data file at `path`, ensures the
    /// schema exists, and seeds sample rows if the file is empty.
    ///
    /// # Errors
    ///
    /// Any error here means the file cannot be used; callers should report
    /// it and exit.
    pub fn open(path: &str, settings: DbRuntimeSettings) -> Result<Self, StoreError> {
        let pool = create_pool(path, settings)?;
        tracing::info!(path, "opening store");
        Self::open_with_pool(pool)
    }

    /// Initializes a store over an existing pool.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the schema cannot be created or seeding
    /// fails.
    pub fn open_with_pool(pool: DbPool) -> Result<Self, StoreError> {
        {
            let conn = pool.get()?;
            init_schema(&conn)?;
            seed::seed_if_empty(&conn)?;
        }
        Ok(Self { pool })
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, StoreError> {
        Ok(self.pool.get()?)
    }

    // ── Clients ─────────────────────────────────────────────────────────

    /// Lists all clients ordered by full name.
    pub fn list_clients(&self) -> Result<Vec<Client>, StoreError> {
        clients::list_clients(&*self.conn()?)
    }

    /// Fetches one client, or `None` if the ID is unknown.
    pub fn get_client(&self, client_id: i64) -> Result<Option<Client>, StoreError> {
        clients::get_client(&*self.conn()?, client_id)
    }

    /// Adds a client and returns its ID.
    pub fn add_client(&self, client: &NewClient) -> Result<i64, StoreError> {
        clients::add_client(&*self.conn()?, client)
    }

    /// Replaces a client's fields. An unknown ID is not an error.
    pub fn update_client(&self, client_id: i64, client: &NewClient) -> Result<(), StoreError> {
        clients::update_client(&*self.conn()?, client_id, client).map(|_| ())
    }

    /// Deletes a client. An unknown ID is not an error.
    pub fn delete_client(&self, client_id: i64) -> Result<(), StoreError> {
        clients::delete_client(&*self.conn()?, client_id).map(|_| ())
    }

    // ── Desserts ────────────────────────────────────────────────────────

    /// Lists all desserts ordered by name.
    pub fn list_desserts(&self) -> Result<Vec<Dessert>, StoreError> {
        desserts::list_desserts(&*self.conn()?)
    }

    /// Fetches one dessert, or `None` if the ID is unknown.
    pub fn get_dessert(&self, dessert_id: i64) -> Result<Option<Dessert>, StoreError> {
        desserts::get_dessert(&*self.conn()?, dessert_id)
    }

    /// Adds a dessert and returns its ID.
    pub fn add_dessert(&self, dessert: &NewDessert) -> Result<i64, StoreError> {
        desserts::add_dessert(&*self.conn()?, dessert)
    }

    /// Replaces a dessert's fields. An unknown ID is not an error.
    pub fn update_dessert(&self, dessert_id: i64, dessert: &NewDessert) -> Result<(), StoreError> {
        desserts::update_dessert(&*self.conn()?, dessert_id, dessert).map(|_| ())
    }

    /// Deletes a dessert. An unknown ID is not an error.
    pub fn delete_dessert(&self, dessert_id: i64) -> Result<(), StoreError> {
        desserts::delete_dessert(&*self.conn()?, dessert_id).map(|_| ())
    }

    // ── Orders ──────────────────────────────────────────────────────────

    /// Lists all orders with client details, most recent first.
    pub fn list_orders(&self) -> Result<Vec<OrderView>, StoreError> {
        orders::list_orders(&*self.conn()?)
    }

    /// Fetches one order with its client details. Orphaned or unknown
    /// orders yield `None`.
    pub fn get_order(&self, order_id: i64) -> Result<Option<OrderView>, StoreError> {
        orders::get_order(&*self.conn()?, order_id)
    }

    /// Adds an order and returns its ID.
    pub fn add_order(&self, order: &NewOrder) -> Result<i64, StoreError> {
        orders::add_order(&*self.conn()?, order)
    }

    /// Deletes an order. An unknown ID is not an error.
    pub fn delete_order(&self, order_id: i64) -> Result<(), StoreError> {
        orders::delete_order(&*self.conn()?, order_id).map(|_| ())
    }

    // ── Maintenance ─────────────────────────────────────────────────────

    /// Row counts per table.
    pub fn table_counts(&self) -> Result<TableCounts, StoreError> {
        maintenance::table_counts(&*self.conn()?)
    }

    /// Empties every table and resets ID sequences. Debug use only.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        maintenance::clear_all(&*self.conn()?)
    }
}
