//! Referential gaps surface as DataIntegrity, never as missing aggregates.

mod common;

use common::{init_logging, retail_fixture, store_with};
use profit_core::{dataset::OrderItem, error::AnalyticsError, store::ProfitStore};
use rusqlite::Connection;

#[test]
fn dangling_product_is_rejected_before_insert() {
    init_logging();
    let mut dataset = retail_fixture();
    dataset.order_items.push(OrderItem {
        order_item_id: 99,
        order_id: 1,
        product_id: 42,
        quantity: 1,
    });

    let store = ProfitStore::in_memory().unwrap();
    store.migrate().unwrap();
    match store.load_dataset(&dataset) {
        Err(AnalyticsError::DataIntegrity { table, id, .. }) => {
            assert_eq!(table, "order_items");
            assert_eq!(id, 99);
        }
        other => panic!("Expected DataIntegrity, got {other:?}"),
    }
    assert_eq!(
        store.row_count("orders").unwrap(),
        0,
        "nothing is written when validation fails"
    );
}

#[test]
fn discount_outside_range_is_rejected() {
    init_logging();
    let mut dataset = retail_fixture();
    dataset.orders[0].discount_percent = 120.0;
    let store = ProfitStore::in_memory().unwrap();
    store.migrate().unwrap();
    assert!(matches!(
        store.load_dataset(&dataset),
        Err(AnalyticsError::DataIntegrity { table: "orders", .. })
    ));
}

#[test]
fn clean_store_passes_verification() {
    let store = store_with(&retail_fixture());
    store.verify_integrity().unwrap();
}

#[test]
fn orphan_written_by_another_tool_is_detected() {
    init_logging();
    let path = std::env::temp_dir().join(format!("profit-orphan-{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);
    {
        // Bundled SQLite enforces foreign keys by default; an external writer may not.
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("PRAGMA foreign_keys=OFF;").unwrap();
        conn.execute_batch(include_str!("../../migrations/001_schema.sql"))
            .unwrap();
        conn.execute_batch(
            "INSERT INTO regions VALUES (1, 'North');
             INSERT INTO customers VALUES (1, 'Acme', 1, '2024-01-01');
             INSERT INTO orders VALUES (1, 1, '2024-02-01', 0);
             INSERT INTO order_items VALUES (1, 1, 7, 2);",
        )
        .unwrap();
    }

    let store = ProfitStore::open_read_only(path.to_str().unwrap()).unwrap();
    let result = store.verify_integrity();
    let _ = std::fs::remove_file(&path);

    match result {
        Err(AnalyticsError::DataIntegrity { table, id, detail }) => {
            assert_eq!(table, "order_items");
            assert_eq!(id, 1);
            assert!(detail.contains("product 7"), "detail was {detail}");
        }
        other => panic!("Expected DataIntegrity, got {other:?}"),
    }
}

#[test]
fn table_counts_list_every_table() {
    let store = store_with(&retail_fixture());
    let counts = store.table_counts().unwrap();
    let names: Vec<_> = counts.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "customers",
            "order_items",
            "orders",
            "payments",
            "products",
            "regions",
            "returns",
            "support_tickets",
        ]
    );
    assert_eq!(store.row_count("orders").unwrap(), 5);
    assert_eq!(store.row_count("support_tickets").unwrap(), 3);
}

#[test]
fn reloading_replaces_previous_rows() {
    let store = store_with(&retail_fixture());
    let mut smaller = retail_fixture();
    smaller.support_tickets.truncate(1);
    store.load_dataset(&smaller).unwrap();

    assert_eq!(store.row_count("orders").unwrap(), 5, "no duplicate key failure");
    assert_eq!(store.row_count("support_tickets").unwrap(), 1);
    store.verify_integrity().unwrap();
}

#[test]
fn regenerating_into_an_existing_file_succeeds() {
    init_logging();
    let path = std::env::temp_dir().join(format!("profit-reload-{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);
    let path_str = path.to_str().unwrap().to_string();

    for _ in 0..2 {
        let store = ProfitStore::open(&path_str).unwrap();
        store.migrate().unwrap();
        store.load_dataset(&retail_fixture()).unwrap();
        assert_eq!(store.row_count("order_items").unwrap(), 5);
    }
    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
}
