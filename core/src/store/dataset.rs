use super::ProfitStore;
use crate::{
    dataset::Dataset,
    error::AnalyticsResult,
    types::CustomerId,
};
use rusqlite::params;
use std::collections::HashMap;

impl ProfitStore {
    // ── Dataset load ───────────────────────────────────────────────

    /// Validate and materialize a dataset in one transaction, replacing any
    /// rows already stored. A dangling reference fails with DataIntegrity
    /// before anything is written.
    pub fn load_dataset(&self, ds: &Dataset) -> AnalyticsResult<()> {
        ds.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        // Children before parents so foreign keys hold at every step.
        tx.execute_batch(
            "DELETE FROM support_tickets;
             DELETE FROM payments;
             DELETE FROM returns;
             DELETE FROM order_items;
             DELETE FROM orders;
             DELETE FROM products;
             DELETE FROM customers;
             DELETE FROM regions;",
        )?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO regions (region_id, region_name) VALUES (?1, ?2)")?;
            for r in &ds.regions {
                stmt.execute(params![r.region_id, r.region_name])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO customers (customer_id, customer_name, region_id, join_date)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for c in &ds.customers {
                stmt.execute(params![c.customer_id, c.customer_name, c.region_id, c.join_date])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO products (product_id, product_name, cost_price, selling_price)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for p in &ds.products {
                stmt.execute(params![p.product_id, p.product_name, p.cost_price, p.selling_price])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO orders (order_id, customer_id, order_date, discount_percent)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for o in &ds.orders {
                stmt.execute(params![o.order_id, o.customer_id, o.order_date, o.discount_percent])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO order_items (order_item_id, order_id, product_id, quantity)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for i in &ds.order_items {
                stmt.execute(params![i.order_item_id, i.order_id, i.product_id, i.quantity])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO returns (return_id, order_id, return_amount) VALUES (?1, ?2, ?3)",
            )?;
            for r in &ds.returns {
                stmt.execute(params![r.return_id, r.order_id, r.return_amount])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO payments (payment_id, order_id, payment_date, amount_paid)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for p in &ds.payments {
                stmt.execute(params![p.payment_id, p.order_id, p.payment_date, p.amount_paid])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO support_tickets (ticket_id, customer_id, ticket_date, resolution_cost)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for t in &ds.support_tickets {
                stmt.execute(params![t.ticket_id, t.customer_id, t.ticket_date, t.resolution_cost])?;
            }
        }
        tx.commit()?;

        log::info!(
            "store: loaded {} customers, {} orders, {} order items",
            ds.customers.len(),
            ds.orders.len(),
            ds.order_items.len()
        );
        Ok(())
    }

    // ── Customer lookups ───────────────────────────────────────────

    pub fn customer_names(&self) -> AnalyticsResult<HashMap<CustomerId, String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT customer_id, customer_name FROM customers")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(rows)
    }
}
