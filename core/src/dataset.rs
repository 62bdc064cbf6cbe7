//! In-memory form of the retail dataset, one Vec per table.
//!
//! The generator produces a Dataset; ProfitStore::load_dataset validates and
//! materializes it into SQLite. Analytics never read from this struct.

use crate::{
    error::{AnalyticsError, AnalyticsResult},
    types::{CustomerId, Money, OrderId, ProductId, RegionId, RowId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub region_id: RegionId,
    pub region_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub region_id: RegionId,
    pub join_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub product_name: String,
    pub cost_price: Money,
    pub selling_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub order_date: NaiveDate,
    pub discount_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: RowId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRecord {
    pub return_id: RowId,
    pub order_id: OrderId,
    pub return_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: RowId,
    pub order_id: OrderId,
    pub payment_date: NaiveDate,
    pub amount_paid: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub ticket_id: RowId,
    pub customer_id: CustomerId,
    pub ticket_date: NaiveDate,
    pub resolution_cost: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub regions: Vec<Region>,
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub returns: Vec<ReturnRecord>,
    pub payments: Vec<Payment>,
    pub support_tickets: Vec<SupportTicket>,
}

impl Dataset {
    /// Check every foreign key against the referenced table.
    /// The first dangling reference is reported as DataIntegrity.
    pub fn validate(&self) -> AnalyticsResult<()> {
        let regions: HashSet<_> = self.regions.iter().map(|r| r.region_id).collect();
        let customers: HashSet<_> = self.customers.iter().map(|c| c.customer_id).collect();
        let products: HashSet<_> = self.products.iter().map(|p| p.product_id).collect();
        let orders: HashSet<_> = self.orders.iter().map(|o| o.order_id).collect();

        for c in &self.customers {
            if !regions.contains(&c.region_id) {
                return Err(dangling("customers", c.customer_id, "region", c.region_id));
            }
        }
        for o in &self.orders {
            if !customers.contains(&o.customer_id) {
                return Err(dangling("orders", o.order_id, "customer", o.customer_id));
            }
            if !(0.0..=100.0).contains(&o.discount_percent) {
                return Err(AnalyticsError::DataIntegrity {
                    table: "orders",
                    id: o.order_id,
                    detail: format!("discount_percent {} outside [0, 100]", o.discount_percent),
                });
            }
        }
        for item in &self.order_items {
            if !orders.contains(&item.order_id) {
                return Err(dangling("order_items", item.order_item_id, "order", item.order_id));
            }
            if !products.contains(&item.product_id) {
                return Err(dangling(
                    "order_items",
                    item.order_item_id,
                    "product",
                    item.product_id,
                ));
            }
        }
        for r in &self.returns {
            if !orders.contains(&r.order_id) {
                return Err(dangling("returns", r.return_id, "order", r.order_id));
            }
        }
        for p in &self.payments {
            if !orders.contains(&p.order_id) {
                return Err(dangling("payments", p.payment_id, "order", p.order_id));
            }
        }
        for t in &self.support_tickets {
            if !customers.contains(&t.customer_id) {
                return Err(dangling("support_tickets", t.ticket_id, "customer", t.customer_id));
            }
        }
        Ok(())
    }
}

fn dangling(table: &'static str, id: RowId, target: &str, target_id: RowId) -> AnalyticsError {
    AnalyticsError::DataIntegrity {
        table,
        id,
        detail: format!("references missing {target} {target_id}"),
    }
}
