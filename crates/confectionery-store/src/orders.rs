//! Order repository operations.
//!
//! Listings join each order with its client. Orders whose client has been
//! deleted stay in the table but drop out of listings.

use confectionery_types::{NewOrder, OrderView};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::StoreError;

const ORDER_VIEW_SELECT: &str = "
    SELECT o.id, c.full_name, c.phone, o.dessert_types, o.order_date,
           o.order_time, o.delivery_type, o.photo_path
    FROM orders o
    JOIN clients c ON o.client_id = c.id";

/// Lists all orders, most recent first.
///
/// Sorted by date then time, both descending, as text. Times written by
/// [`NewOrder::compose`] are zero-padded, which keeps the text order
/// chronological.
pub fn list_orders(conn: &Connection) -> Result<Vec<OrderView>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "{ORDER_VIEW_SELECT} ORDER BY o.order_date DESC, o.order_time DESC"
    ))?;

    let rows = stmt.query_map([], map_row_to_order_view)?;
    let mut orders = Vec::new();
    for row in rows {
        orders.push(row?);
    }
    Ok(orders)
}

/// Retrieves one order with its client details, or `None` if the order does
/// not exist or its client is gone.
pub fn get_order(conn: &Connection, order_id: i64) -> Result<Option<OrderView>, StoreError> {
    Ok(conn
        .query_row(
            &format!("{ORDER_VIEW_SELECT} WHERE o.id = ?1"),
            [order_id],
            map_row_to_order_view,
        )
        .optional()?)
}

/// Inserts an order and returns its new ID.
///
/// Neither the client ID nor the dessert names are checked against their
/// tables.
pub fn add_order(conn: &Connection, order: &NewOrder) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO orders
            (client_id, dessert_types, order_date, order_time, delivery_type, photo_path)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            order.client_id,
            order.dessert_types,
            order.order_date,
            order.order_time,
            order.delivery_type.as_str(),
            order.photo_path,
        ],
    )?;

    let id = conn.last_insert_rowid();
    tracing::debug!(order_id = id, client_id = order.client_id, "added order");
    Ok(id)
}

/// Deletes an order by ID.
pub fn delete_order(conn: &Connection, order_id: i64) -> Result<usize, StoreError> {
    let changed = conn.execute("DELETE FROM orders WHERE id = ?1", [order_id])?;
    tracing::debug!(order_id, changed, "deleted order");
    Ok(changed)
}

fn map_row_to_order_view(row: &Row) -> rusqlite::Result<OrderView> {
    Ok(OrderView {
        id: row.get(0)?,
        client_name: row.get(1)?,
        client_phone: row.get(2)?,
        dessert_types: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        order_date: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        order_time: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        delivery_type: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        photo_path: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
    })
}
