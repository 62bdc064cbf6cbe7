use super::ProfitStore;
use crate::{error::AnalyticsResult, risk::RiskActivity};
use rusqlite::params;

impl ProfitStore {
    // ── Risk activity ──────────────────────────────────────────────

    /// Behaviour counts for every customer with at least one order in the
    /// population, ordered by customer id.
    ///
    /// Payment delay is measured per order from its earliest payment and then
    /// averaged; orders without payments do not contribute. Ticket counts are
    /// not restricted to the order population.
    pub fn risk_activity(&self, include_empty: bool) -> AnalyticsResult<Vec<RiskActivity>> {
        let mut stmt = self.conn.prepare(
            "WITH order_pop AS (
                 SELECT o.order_id, o.customer_id, o.order_date
                 FROM orders o
                 WHERE ?1 OR EXISTS (
                     SELECT 1 FROM order_items oi WHERE oi.order_id = o.order_id
                 )
             ),
             first_payment AS (
                 SELECT op.order_id, op.customer_id,
                        julianday(MIN(p.payment_date)) - julianday(op.order_date) AS delay
                 FROM order_pop op
                 JOIN payments p ON p.order_id = op.order_id
                 GROUP BY op.order_id, op.customer_id, op.order_date
             ),
             payment_delay AS (
                 SELECT customer_id, AVG(delay) AS avg_delay
                 FROM first_payment
                 GROUP BY customer_id
             ),
             return_counts AS (
                 SELECT op.customer_id,
                        COUNT(DISTINCT op.order_id) AS order_count,
                        COUNT(r.return_id) AS return_count
                 FROM order_pop op
                 LEFT JOIN returns r ON r.order_id = op.order_id
                 GROUP BY op.customer_id
             ),
             support_activity AS (
                 SELECT customer_id, COUNT(*) AS ticket_count
                 FROM support_tickets
                 GROUP BY customer_id
             )
             SELECT rc.customer_id, rc.order_count, rc.return_count,
                    pd.avg_delay, COALESCE(sa.ticket_count, 0)
             FROM return_counts rc
             LEFT JOIN payment_delay pd ON pd.customer_id = rc.customer_id
             LEFT JOIN support_activity sa ON sa.customer_id = rc.customer_id
             ORDER BY rc.customer_id",
        )?;
        let rows = stmt
            .query_map(params![include_empty], |row| {
                Ok(RiskActivity {
                    customer_id: row.get(0)?,
                    order_count: row.get(1)?,
                    return_count: row.get(2)?,
                    avg_payment_delay_days: row.get(3)?,
                    support_ticket_count: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
