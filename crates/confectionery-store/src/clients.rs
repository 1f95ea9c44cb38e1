//! Client repository operations.

use confectionery_types::{Client, NewClient};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{classify_write, StoreError};

/// Lists all clients ordered by full name.
pub fn list_clients(conn: &Connection) -> Result<Vec<Client>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, full_name, phone, birth_date, email
         FROM clients ORDER BY full_name ASC",
    )?;

    let rows = stmt.query_map([], map_row_to_client)?;
    let mut clients = Vec::new();
    for row in rows {
        clients.push(row?);
    }
    Ok(clients)
}

/// Retrieves a client by ID, or `None` if no such row exists.
pub fn get_client(conn: &Connection, client_id: i64) -> Result<Option<Client>, StoreError> {
    Ok(conn
        .query_row(
            "SELECT id, full_name, phone, birth_date, email FROM clients WHERE id = ?1",
            [client_id],
            map_row_to_client,
        )
        .optional()?)
}

/// Inserts a client and returns its new ID.
///
/// # Errors
///
/// Returns [`StoreError::Duplicate`] if the phone is already taken.
pub fn add_client(conn: &Connection, client: &NewClient) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO clients (full_name, phone, birth_date, email) VALUES (?1, ?2, ?3, ?4)",
        params![
            client.full_name,
            client.phone,
            client.birth_date,
            client.email
        ],
    )
    .map_err(classify_write)?;

    let id = conn.last_insert_rowid();
    tracing::debug!(client_id = id, "added client");
    Ok(id)
}

/// Replaces every mutable field of a client.
///
/// Returns the number of rows changed; an unknown ID changes nothing and is
/// not an error.
///
/// # Errors
///
/// Returns [`StoreError::Duplicate`] if the new phone belongs to another
/// client.
pub fn update_client(
    conn: &Connection,
    client_id: i64,
    client: &NewClient,
) -> Result<usize, StoreError> {
    let changed = conn
        .execute(
            "UPDATE clients SET full_name = ?1, phone = ?2, birth_date = ?3, email = ?4
             WHERE id = ?5",
            params![
                client.full_name,
                client.phone,
                client.birth_date,
                client.email,
                client_id
            ],
        )
        .map_err(classify_write)?;

    tracing::debug!(client_id, changed, "updated client");
    Ok(changed)
}

/// Deletes a client by ID. Orders referencing the client are left as they
/// are.
pub fn delete_client(conn: &Connection, client_id: i64) -> Result<usize, StoreError> {
    let changed = conn.execute("DELETE FROM clients WHERE id = ?1", [client_id])?;
    tracing::debug!(client_id, changed, "deleted client");
    Ok(changed)
}

fn map_row_to_client(row: &Row) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get(0)?,
        full_name: row.get(1)?,
        phone: row.get(2)?,
        birth_date: row.get(3)?,
        email: row.get(4)?,
    })
}
