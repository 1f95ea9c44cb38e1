//! One-time sample data for a fresh data file.

use confectionery_types::DeliveryType;
use rusqlite::{params, Connection};

use crate::error::StoreError;
use crate::maintenance::table_counts;

const SAMPLE_CLIENTS: [(&str, &str, &str, &str); 3] = [
    (
        "Иванов Иван Иванович",
        "+79161234567",
        "1990-05-15",
        "ivanov@mail.ru",
    ),
    (
        "Петрова Мария Сергеевна",
        "+79167654321",
        "1985-12-20",
        "petrova@gmail.com",
    ),
    (
        "Сидоров Алексей Петрович",
        "+79031112233",
        "1992-08-03",
        "sidorov@yandex.ru",
    ),
];

const SAMPLE_DESSERTS: [(&str, Option<f64>, Option<f64>, &str); 5] = [
    (
        "Торт \"Наполеон\"",
        Some(1200.0),
        None,
        "мука, масло, яйца, молоко, сахар",
    ),
    (
        "Торт \"Медовик\"",
        Some(1100.0),
        None,
        "мука, мед, яйца, сметана, сахар",
    ),
    ("Эклеры", None, Some(150.0), "заварной крем, тесто, глазурь"),
    (
        "Макаруны",
        None,
        Some(80.0),
        "миндальная мука, сахар, яичный белок, начинка",
    ),
    (
        "Чизкейк Нью-Йорк",
        Some(1400.0),
        None,
        "творожный сыр, печенье, сливки, яйца",
    ),
];

/// Sample orders: index into the seeded clients, then the order fields.
const SAMPLE_ORDERS: [(usize, &str, &str, &str, DeliveryType); 2] = [
    (
        0,
        "Торт \"Наполеон\",Эклеры",
        "2024-01-15",
        "14:30",
        DeliveryType::Delivery,
    ),
    (
        1,
        "Макаруны,Чизкейк Нью-Йорк",
        "2024-01-16",
        "10:00",
        DeliveryType::Pickup,
    ),
];

/// Inserts the sample data if both `clients` and `desserts` are empty.
///
/// All inserts share one transaction, so a failure leaves the file
/// unseeded and the next startup tries again. Returns whether seeding ran.
pub(crate) fn seed_if_empty(conn: &Connection) -> Result<bool, StoreError> {
    let counts = table_counts(conn)?;
    if counts.clients != 0 || counts.desserts != 0 {
        tracing::debug!(
            clients = counts.clients,
            desserts = counts.desserts,
            "data file already populated, skipping sample data"
        );
        return Ok(false);
    }

    tracing::info!("adding sample data");

    let tx = conn.unchecked_transaction()?;

    let mut client_ids = Vec::with_capacity(SAMPLE_CLIENTS.len());
    {
        let mut stmt = tx.prepare(
            "INSERT INTO clients (full_name, phone, birth_date, email) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (full_name, phone, birth_date, email) in SAMPLE_CLIENTS {
            client_ids.push(stmt.insert(params![full_name, phone, birth_date, email])?);
        }

        let mut stmt = tx.prepare(
            "INSERT INTO desserts (name, price_per_kg, price_per_unit, composition)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (name, per_kg, per_unit, composition) in SAMPLE_DESSERTS {
            stmt.execute(params![name, per_kg, per_unit, composition])?;
        }

        let mut stmt = tx.prepare(
            "INSERT INTO orders
                (client_id, dessert_types, order_date, order_time, delivery_type, photo_path)
             VALUES (?1, ?2, ?3, ?4, ?5, '')",
        )?;
        for (client, dessert_types, date, time, delivery) in SAMPLE_ORDERS {
            stmt.execute(params![
                client_ids[client],
                dessert_types,
                date,
                time,
                delivery.as_str()
            ])?;
        }
    }

    tx.commit()?;

    tracing::info!(
        clients = SAMPLE_CLIENTS.len(),
        desserts = SAMPLE_DESSERTS.len(),
        orders = SAMPLE_ORDERS.len(),
        "sample data added"
    );
    Ok(true)
}
