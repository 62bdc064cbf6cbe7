//! Revenue concentration (80/20) analysis.
//!
//! Revenue here is gross item revenue: no discount, no returns. The running
//! sum and the denominator always cover the whole customer population;
//! truncating to N rows happens only when the report is assembled.

use crate::{
    error::{AnalyticsError, AnalyticsResult},
    types::{CustomerId, Money},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRevenue {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoRow {
    /// 1-based position in revenue-descending order.
    pub position: usize,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub revenue: Money,
    pub cumulative_revenue: Money,
    pub total_revenue: Money,
    /// cumulative_revenue / total_revenue × 100, rounded to 2 dp.
    pub cumulative_percentage: f64,
}

/// Round half away from zero to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Order customers by revenue (desc, ties by id asc) and accumulate row by row.
pub fn pareto(mut revenues: Vec<CustomerRevenue>) -> AnalyticsResult<Vec<ParetoRow>> {
    if revenues.is_empty() {
        return Err(AnalyticsError::EmptyPopulation { metric: "pareto" });
    }
    revenues.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    });

    // Summed in display order so the last cumulative value equals the total exactly.
    let total_revenue: Money = revenues.iter().map(|r| r.revenue).sum();
    if total_revenue == 0.0 {
        return Err(AnalyticsError::DivisionByZero {
            metric: "pareto.cumulative_percentage",
        });
    }

    let mut cumulative_revenue = 0.0;
    Ok(revenues
        .into_iter()
        .enumerate()
        .map(|(i, r)| {
            cumulative_revenue += r.revenue;
            ParetoRow {
                position: i + 1,
                customer_id: r.customer_id,
                customer_name: r.customer_name,
                revenue: r.revenue,
                cumulative_revenue,
                total_revenue,
                cumulative_percentage: round2(cumulative_revenue * 100.0 / total_revenue),
            }
        })
        .collect())
}

/// Number of leading customers whose cumulative share first reaches `share_percent`.
pub fn customers_to_reach(rows: &[ParetoRow], share_percent: f64) -> usize {
    rows.iter()
        .position(|r| r.cumulative_percentage >= share_percent)
        .map(|i| i + 1)
        .unwrap_or(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rev(customer_id: CustomerId, revenue: Money) -> CustomerRevenue {
        CustomerRevenue {
            customer_id,
            customer_name: format!("C{customer_id}"),
            revenue,
        }
    }

    #[test]
    fn cumulative_share_reaches_one_hundred() {
        let rows = pareto(vec![rev(1, 100.0), rev(2, 300.0), rev(3, 600.0)]).unwrap();

        let ids: Vec<_> = rows.iter().map(|r| r.customer_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        let pct: Vec<_> = rows.iter().map(|r| r.cumulative_percentage).collect();
        assert_eq!(pct, vec![60.0, 90.0, 100.0]);
        assert!(rows.iter().all(|r| r.total_revenue == 1000.0));
    }

    #[test]
    fn percentages_are_rounded_to_two_places() {
        let rows = pareto(vec![rev(1, 1.0), rev(2, 1.0), rev(3, 1.0)]).unwrap();
        let pct: Vec<_> = rows.iter().map(|r| r.cumulative_percentage).collect();
        assert_eq!(pct, vec![33.33, 66.67, 100.0]);
    }

    #[test]
    fn equal_revenue_ordered_by_customer_id() {
        let rows = pareto(vec![rev(9, 50.0), rev(4, 50.0)]).unwrap();
        assert_eq!(rows[0].customer_id, 4);
        assert_eq!(rows[1].customer_id, 9);
        assert_eq!(rows[0].cumulative_revenue, 50.0);
        assert_eq!(rows[1].cumulative_revenue, 100.0);
    }

    #[test]
    fn empty_population_is_an_error() {
        assert!(matches!(
            pareto(Vec::new()),
            Err(AnalyticsError::EmptyPopulation { .. })
        ));
    }

    #[test]
    fn zero_total_revenue_is_an_error() {
        assert!(matches!(
            pareto(vec![rev(1, 0.0), rev(2, 0.0)]),
            Err(AnalyticsError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn eighty_percent_threshold() {
        let rows = pareto(vec![rev(1, 700.0), rev(2, 200.0), rev(3, 100.0)]).unwrap();
        assert_eq!(customers_to_reach(&rows, 80.0), 2);
        assert_eq!(customers_to_reach(&rows, 50.0), 1);
    }
}
