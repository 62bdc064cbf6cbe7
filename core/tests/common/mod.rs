//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use chrono::NaiveDate;
use profit_core::{
    config::AnalyticsConfig,
    dataset::{
        Customer, Dataset, Order, OrderItem, Payment, Product, Region, ReturnRecord,
        SupportTicket,
    },
    generator::DatasetGenerator,
    store::ProfitStore,
};

pub const EPS: f64 = 1e-9;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn store_with(dataset: &Dataset) -> ProfitStore {
    init_logging();
    let store = ProfitStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store.load_dataset(dataset).expect("load dataset");
    store
}

pub fn generated_store(seed: u64, config: &AnalyticsConfig) -> ProfitStore {
    let dataset = DatasetGenerator::new(seed, config.generator.clone())
        .generate()
        .expect("generate");
    store_with(&dataset)
}

/// Small hand-checked retail dataset.
///
/// - Acme (1): order 1 (gross 500, cost 300, 10% off, returns 30 + 20) and
///   order 2 (gross 50, cost 30); tickets 150 + 50.
/// - Bolt (2): order 3 sells below cost (gross 200, cost 400, 20% off) and
///   order 5 (gross 150, cost 90, 5% off, never paid).
/// - Cedar (3): a ticket but no orders.
/// - Dune (4): order 4 has no items, one return of 10.
pub fn retail_fixture() -> Dataset {
    let customer = |customer_id, customer_name: &str| Customer {
        customer_id,
        customer_name: customer_name.to_string(),
        region_id: 1,
        join_date: date(2023, 6, 1),
    };
    let product = |product_id, cost_price, selling_price| Product {
        product_id,
        product_name: format!("Product {product_id}"),
        cost_price,
        selling_price,
    };
    let order = |order_id, customer_id, order_date, discount_percent| Order {
        order_id,
        customer_id,
        order_date,
        discount_percent,
    };
    let item = |order_item_id, order_id, product_id, quantity| OrderItem {
        order_item_id,
        order_id,
        product_id,
        quantity,
    };
    let payment = |payment_id, order_id, payment_date| Payment {
        payment_id,
        order_id,
        payment_date,
        amount_paid: 100.0,
    };
    let ticket = |ticket_id, customer_id, resolution_cost| SupportTicket {
        ticket_id,
        customer_id,
        ticket_date: date(2024, 5, 1),
        resolution_cost,
    };

    Dataset {
        regions: vec![Region {
            region_id: 1,
            region_name: "North".into(),
        }],
        customers: vec![
            customer(1, "Acme"),
            customer(2, "Bolt"),
            customer(3, "Cedar"),
            customer(4, "Dune"),
        ],
        products: vec![
            product(1, 30.0, 50.0),
            product(2, 90.0, 150.0),
            product(3, 200.0, 100.0),
        ],
        orders: vec![
            order(1, 1, date(2024, 1, 1), 10.0),
            order(2, 1, date(2024, 2, 1), 0.0),
            order(3, 2, date(2024, 3, 1), 20.0),
            order(4, 4, date(2024, 3, 5), 0.0),
            order(5, 2, date(2024, 4, 1), 5.0),
        ],
        order_items: vec![
            item(1, 1, 1, 4),
            item(2, 1, 2, 2),
            item(3, 2, 1, 1),
            item(4, 3, 3, 2),
            item(5, 5, 2, 1),
        ],
        returns: vec![
            ReturnRecord {
                return_id: 1,
                order_id: 1,
                return_amount: 30.0,
            },
            ReturnRecord {
                return_id: 2,
                order_id: 1,
                return_amount: 20.0,
            },
            ReturnRecord {
                return_id: 3,
                order_id: 4,
                return_amount: 10.0,
            },
        ],
        payments: vec![
            payment(1, 1, date(2024, 1, 3)),
            payment(2, 1, date(2024, 1, 10)),
            payment(3, 2, date(2024, 2, 3)),
            payment(4, 3, date(2024, 3, 11)),
            payment(5, 4, date(2024, 3, 6)),
        ],
        support_tickets: vec![ticket(1, 1, 150.0), ticket(2, 1, 50.0), ticket(3, 3, 40.0)],
    }
}
