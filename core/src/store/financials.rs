use super::ProfitStore;
use crate::{
    error::AnalyticsResult,
    financials::{net_revenue, OrderFinancials},
    types::{CustomerId, Money},
};
use rusqlite::params;
use std::collections::HashMap;

/// Gross item revenue and cost over every order item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTotals {
    pub total_revenue: Money,
    pub total_cost: Money,
}

impl ProfitStore {
    // ── Order financials ───────────────────────────────────────────

    /// One row per order, ordered by order id.
    ///
    /// With `include_empty` false, orders without items are left out; with it
    /// true they appear with zero revenue and cost. Returns are summed in a
    /// correlated subquery so they are not multiplied by the item count.
    pub fn order_financials(&self, include_empty: bool) -> AnalyticsResult<Vec<OrderFinancials>> {
        let mut stmt = self.conn.prepare(
            "SELECT o.order_id, o.customer_id, o.discount_percent,
                    COUNT(oi.order_item_id),
                    COALESCE(SUM(oi.quantity * p.selling_price), 0.0),
                    COALESCE(SUM(oi.quantity * p.cost_price), 0.0),
                    COALESCE((SELECT SUM(r.return_amount) FROM returns r
                              WHERE r.order_id = o.order_id), 0.0)
             FROM orders o
             LEFT JOIN order_items oi ON oi.order_id = o.order_id
             LEFT JOIN products p ON p.product_id = oi.product_id
             GROUP BY o.order_id
             HAVING ?1 OR COUNT(oi.order_item_id) > 0
             ORDER BY o.order_id",
        )?;
        let rows = stmt
            .query_map(params![include_empty], |row| {
                let discount_percent: f64 = row.get(2)?;
                let gross_revenue: Money = row.get(4)?;
                Ok(OrderFinancials {
                    order_id: row.get(0)?,
                    customer_id: row.get(1)?,
                    discount_percent,
                    item_count: row.get(3)?,
                    gross_revenue,
                    total_cost: row.get(5)?,
                    net_revenue: net_revenue(gross_revenue, discount_percent),
                    returns: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "store: {} order rows (include_empty={include_empty})",
            rows.len()
        );
        Ok(rows)
    }

    /// Σ resolution_cost per customer. Customers without tickets are absent.
    pub fn customer_support_costs(&self) -> AnalyticsResult<HashMap<CustomerId, Money>> {
        let mut stmt = self.conn.prepare(
            "SELECT customer_id, SUM(resolution_cost)
             FROM support_tickets
             GROUP BY customer_id",
        )?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(rows)
    }

    // ── Dashboard totals ───────────────────────────────────────────

    pub fn item_totals(&self) -> AnalyticsResult<ItemTotals> {
        let totals = self.conn.query_row(
            "SELECT COALESCE(SUM(oi.quantity * p.selling_price), 0.0),
                    COALESCE(SUM(oi.quantity * p.cost_price), 0.0)
             FROM order_items oi
             JOIN products p ON p.product_id = oi.product_id",
            [],
            |row| {
                Ok(ItemTotals {
                    total_revenue: row.get(0)?,
                    total_cost: row.get(1)?,
                })
            },
        )?;
        Ok(totals)
    }
}
