//! Customer risk scoring.
//!
//! risk = w_delay × avg_payment_delay_days
//!      + w_return × (return_ratio × scale)
//!      + w_ticket × support_ticket_count
//!      + penalty when gross profit (revenue - cost) < 0
//!
//! Ticket count is not normalized: heavy support volume dominates the score.

use crate::{
    config::RiskWeights,
    error::{AnalyticsError, AnalyticsResult},
    financials::CustomerProfit,
    types::{CustomerId, Money},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-customer behaviour counts read from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskActivity {
    pub customer_id: CustomerId,
    pub order_count: i64,
    pub return_count: i64,
    /// Mean over the customer's paid orders of (earliest payment date -
    /// order date) in days. Additional payments on an order do not count.
    /// None when no order of the customer has a payment.
    pub avg_payment_delay_days: Option<f64>,
    pub support_ticket_count: i64,
}

/// The model's inputs after the coalesce-to-zero policy has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskInputs {
    pub avg_payment_delay_days: f64,
    pub return_ratio: f64,
    pub support_ticket_count: i64,
    pub revenue: Money,
    pub cost: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub revenue: Money,
    pub gross_profit: Money,
    pub avg_payment_delay_days: f64,
    pub return_ratio: f64,
    pub support_ticket_count: i64,
    pub unprofitable: bool,
    pub risk_score: f64,
}

pub struct RiskModel {
    weights: RiskWeights,
}

impl RiskModel {
    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, inputs: &RiskInputs) -> f64 {
        let w = &self.weights;
        let penalty = if inputs.revenue - inputs.cost < 0.0 {
            w.unprofitable_penalty
        } else {
            0.0
        };
        w.payment_delay * inputs.avg_payment_delay_days
            + w.return_ratio * (inputs.return_ratio * w.return_ratio_scale)
            + w.support_tickets * inputs.support_ticket_count as f64
            + penalty
    }

    /// Score every customer in `customers`, highest risk first (ties by id).
    ///
    /// Customers with no activity row get zero delay, ratio and tickets.
    pub fn score_customers(
        &self,
        customers: &[CustomerProfit],
        activity: &[RiskActivity],
    ) -> AnalyticsResult<Vec<RiskScore>> {
        let by_id: HashMap<CustomerId, &RiskActivity> =
            activity.iter().map(|a| (a.customer_id, a)).collect();

        let mut scores = customers
            .iter()
            .map(|c| -> AnalyticsResult<RiskScore> {
                let inputs = match by_id.get(&c.customer_id) {
                    Some(a) => RiskInputs {
                        avg_payment_delay_days: a.avg_payment_delay_days.unwrap_or(0.0),
                        return_ratio: return_ratio(a.return_count, a.order_count)?,
                        support_ticket_count: a.support_ticket_count,
                        revenue: c.gross_revenue,
                        cost: c.total_cost,
                    },
                    None => RiskInputs {
                        avg_payment_delay_days: 0.0,
                        return_ratio: 0.0,
                        support_ticket_count: 0,
                        revenue: c.gross_revenue,
                        cost: c.total_cost,
                    },
                };
                Ok(RiskScore {
                    customer_id: c.customer_id,
                    customer_name: c.customer_name.clone(),
                    revenue: inputs.revenue,
                    gross_profit: inputs.revenue - inputs.cost,
                    avg_payment_delay_days: inputs.avg_payment_delay_days,
                    return_ratio: inputs.return_ratio,
                    support_ticket_count: inputs.support_ticket_count,
                    unprofitable: inputs.revenue - inputs.cost < 0.0,
                    risk_score: self.score(&inputs),
                })
            })
            .collect::<AnalyticsResult<Vec<_>>>()?;

        scores.sort_by(|a, b| {
            b.risk_score
                .total_cmp(&a.risk_score)
                .then_with(|| a.customer_id.cmp(&b.customer_id))
        });

        let flagged = scores.iter().filter(|s| s.unprofitable).count();
        log::debug!(
            "risk: scored {} customers, {flagged} with negative gross profit",
            scores.len()
        );
        Ok(scores)
    }
}

/// Return records per distinct order. Undefined for a customer without orders.
pub fn return_ratio(return_count: i64, order_count: i64) -> AnalyticsResult<f64> {
    if order_count <= 0 {
        return Err(AnalyticsError::DivisionByZero {
            metric: "risk.return_ratio",
        });
    }
    Ok(return_count as f64 / order_count as f64)
}
