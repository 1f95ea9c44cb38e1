//! Dessert repository operations.
//!
//! Prices are stored exactly as given. Whether at least one price must be
//! set is the caller's decision (see [`NewDessert::require_price`]).

use confectionery_types::{Dessert, NewDessert};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{classify_write, StoreError};

/// Lists all desserts ordered by name.
pub fn list_desserts(conn: &Connection) -> Result<Vec<Dessert>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, price_per_kg, price_per_unit, composition
         FROM desserts ORDER BY name ASC",
    )?;

    let rows = stmt.query_map([], map_row_to_dessert)?;
    let mut desserts = Vec::new();
    for row in rows {
        desserts.push(row?);
    }
    Ok(desserts)
}

/// Retrieves a dessert by ID, or `None` if no such row exists.
pub fn get_dessert(conn: &Connection, dessert_id: i64) -> Result<Option<Dessert>, StoreError> {
    Ok(conn
        .query_row(
            "SELECT id, name, price_per_kg, price_per_unit, composition
             FROM desserts WHERE id = ?1",
            [dessert_id],
            map_row_to_dessert,
        )
        .optional()?)
}

/// Inserts a dessert and returns its new ID.
///
/// # Errors
///
/// Returns [`StoreError::Duplicate`] if the name is already taken.
pub fn add_dessert(conn: &Connection, dessert: &NewDessert) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO desserts (name, price_per_kg, price_per_unit, composition)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            dessert.name,
            dessert.price_per_kg,
            dessert.price_per_unit,
            dessert.composition
        ],
    )
    .map_err(classify_write)?;

    let id = conn.last_insert_rowid();
    tracing::debug!(dessert_id = id, "added dessert");
    Ok(id)
}

/// Replaces every mutable field of a dessert. Existing orders keep the old
/// name in their stored dessert text.
///
/// # Errors
///
/// Returns [`StoreError::Duplicate`] if the new name belongs to another
/// dessert.
pub fn update_dessert(
    conn: &Connection,
    dessert_id: i64,
    dessert: &NewDessert,
) -> Result<usize, StoreError> {
    let changed = conn
        .execute(
            "UPDATE desserts SET name = ?1, price_per_kg = ?2, price_per_unit = ?3, composition = ?4
             WHERE id = ?5",
            params![
                dessert.name,
                dessert.price_per_kg,
                dessert.price_per_unit,
                dessert.composition,
                dessert_id
            ],
        )
        .map_err(classify_write)?;

    tracing::debug!(dessert_id, changed, "updated dessert");
    Ok(changed)
}

/// Deletes a dessert by ID.
pub fn delete_dessert(conn: &Connection, dessert_id: i64) -> Result<usize, StoreError> {
    let changed = conn.execute("DELETE FROM desserts WHERE id = ?1", [dessert_id])?;
    tracing::debug!(dessert_id, changed, "deleted dessert");
    Ok(changed)
}

fn map_row_to_dessert(row: &Row) -> rusqlite::Result<Dessert> {
    Ok(Dessert {
        id: row.get(0)?,
        name: row.get(1)?,
        price_per_kg: row.get(2)?,
        price_per_unit: row.get(3)?,
        composition: row.get(4)?,
    })
}
