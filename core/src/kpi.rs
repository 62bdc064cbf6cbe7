//! Headline dashboard figures and the customer margin views.

use crate::{
    error::{AnalyticsError, AnalyticsResult},
    financials::CustomerProfit,
    pareto::round2,
    types::{CustomerId, Money},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_revenue: Money,
    pub total_cost: Money,
    pub total_profit: Money,
    /// Profit as a percentage of revenue, rounded to 2 dp.
    pub profit_margin: f64,
}

impl KpiSummary {
    /// Build from gross item revenue and cost summed over every order item.
    pub fn from_totals(total_revenue: Money, total_cost: Money) -> AnalyticsResult<Self> {
        if total_revenue == 0.0 {
            return Err(AnalyticsError::DivisionByZero {
                metric: "kpi.profit_margin",
            });
        }
        let total_profit = total_revenue - total_cost;
        Ok(Self {
            total_revenue,
            total_cost,
            total_profit,
            profit_margin: round2(total_profit * 100.0 / total_revenue),
        })
    }
}

/// Gross (undiscounted) margin of one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerMargin {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub revenue: Money,
    pub cost: Money,
    pub profit: Money,
}

/// Every customer's gross margin, most profitable first (ties by id).
pub fn customer_margins(customers: &[CustomerProfit]) -> Vec<CustomerMargin> {
    let mut margins: Vec<CustomerMargin> = customers
        .iter()
        .map(|c| CustomerMargin {
            customer_id: c.customer_id,
            customer_name: c.customer_name.clone(),
            revenue: c.gross_revenue,
            cost: c.total_cost,
            profit: c.gross_profit(),
        })
        .collect();
    margins.sort_by(|a, b| {
        b.profit
            .total_cmp(&a.profit)
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    });
    margins
}

/// The `n` most profitable and the `n` least profitable customers.
/// The bottom view is listed least profitable first.
pub fn margin_views(
    margins: &[CustomerMargin],
    n: usize,
) -> (Vec<CustomerMargin>, Vec<CustomerMargin>) {
    let top = margins.iter().take(n).cloned().collect();
    let bottom = margins.iter().rev().take(n).cloned().collect();
    (top, bottom)
}
