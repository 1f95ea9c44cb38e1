use confectionery_db::{init_schema, DbRuntimeSettings, JournalMode};
use confectionery_store::{add_client, list_clients, table_counts, Store, StoreError};
use confectionery_types::NewClient;
use rusqlite::Connection;

#[test]
fn open_fails_for_unusable_path() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("no-such-dir").join("confectionery.db");
    let settings = DbRuntimeSettings {
        connection_timeout_ms: 200,
        ..DbRuntimeSettings::default()
    };

    let err = Store::open(path.to_str().expect("utf-8 path"), settings)
        .expect_err("opening inside a missing directory should fail");
    assert!(matches!(err, StoreError::Pool(_)));
    assert!(err.is_fatal());
}

#[test]
fn store_works_in_wal_mode() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("confectionery.db");
    let settings = DbRuntimeSettings {
        journal_mode: JournalMode::Wal,
        ..DbRuntimeSettings::default()
    };

    let store = Store::open(path.to_str().expect("utf-8 path"), settings).expect("store should open");
    let counts = store.table_counts().expect("counts should succeed");
    assert_eq!(counts.clients, 3);
}

#[test]
fn connection_functions_work_without_a_store() {
    let conn = Connection::open_in_memory().expect("failed to open db");
    init_schema(&conn).expect("schema creation failed");

    assert!(table_counts(&conn).expect("counts failed").is_empty());

    let client = NewClient::from_form("Кузнецова Ольга", "+79005554433", None, "olga@example.com")
        .expect("form should validate");
    let id = add_client(&conn, &client).expect("insert failed");

    let clients = list_clients(&conn).expect("list failed");
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].id, id);
    assert_eq!(clients[0].email.as_deref(), Some("olga@example.com"));
}

#[test]
fn store_sees_rows_written_by_a_legacy_file() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("legacy.db");

    {
        // Schema and rows as the desktop app left them before its first
        // order was ever placed.
        let conn = Connection::open(&path).expect("failed to open legacy file");
        conn.execute_batch(
            "CREATE TABLE clients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name TEXT NOT NULL,
                phone TEXT NOT NULL UNIQUE,
                birth_date TEXT,
                email TEXT
            );
            CREATE TABLE desserts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                price_per_kg REAL,
                price_per_unit REAL,
                composition TEXT
            );
            INSERT INTO clients (full_name, phone) VALUES ('Старый клиент', '+70001112233');",
        )
        .expect("failed to build legacy schema");
    }

    let store = Store::open(path.to_str().expect("utf-8 path"), DbRuntimeSettings::default())
        .expect("store should open legacy file");

    let counts = store.table_counts().expect("counts should succeed");
    assert_eq!(counts.clients, 1, "populated file must not be seeded");
    assert_eq!(counts.desserts, 0);
    assert_eq!(counts.orders, 0, "missing orders table is created");

    let conn = Connection::open(&path).expect("failed to reopen legacy file");
    let tables: Vec<String> = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )
        .expect("failed to prepare table list")
        .query_map([], |row| row.get(0))
        .expect("failed to list tables")
        .map(|r| r.expect("failed to read table name"))
        .collect();
    assert_eq!(
        tables,
        ["clients", "desserts", "orders"],
        "no bookkeeping tables are added"
    );
}
