//! Order- and customer-level profit.
//!
//! The store supplies one OrderFinancials row per order (gross revenue and
//! cost summed over its items, returns summed over its return records).
//! Everything above the order level is aggregated here.

use crate::{
    config::SupportAllocation,
    error::{AnalyticsError, AnalyticsResult},
    types::{CustomerId, Money, OrderId},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Order-level discount applied uniformly to the order's gross revenue.
pub fn net_revenue(gross_revenue: Money, discount_percent: f64) -> Money {
    gross_revenue * (1.0 - discount_percent / 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFinancials {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub discount_percent: f64,
    pub item_count: i64,
    /// Σ quantity × selling_price
    pub gross_revenue: Money,
    /// Σ quantity × cost_price
    pub total_cost: Money,
    pub net_revenue: Money,
    /// Σ return_amount; zero when the order has no returns.
    pub returns: Money,
}

/// Fully-allocated ("true") profit of a single order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProfit {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub net_revenue: Money,
    pub total_cost: Money,
    pub returns: Money,
    pub allocated_support_cost: Money,
    pub true_profit: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfit {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub order_count: i64,
    /// Undiscounted item revenue.
    pub gross_revenue: Money,
    /// Σ net_revenue over the customer's orders.
    pub total_revenue: Money,
    pub total_cost: Money,
    pub total_returns: Money,
    /// total_revenue - total_cost - total_returns
    pub total_profit: Money,
}

impl CustomerProfit {
    /// Revenue minus cost before discount and returns.
    pub fn gross_profit(&self) -> Money {
        self.gross_revenue - self.total_cost
    }
}

/// Charge every order with its customer's support cost / divisor.
///
/// The allocated amount is the same for each of the customer's orders; it is
/// not divided by the customer's order count. Customers without tickets are
/// charged nothing.
pub fn allocate_support_costs(
    orders: &[OrderFinancials],
    support_costs: &HashMap<CustomerId, Money>,
    allocation: &SupportAllocation,
) -> AnalyticsResult<Vec<OrderProfit>> {
    if allocation.divisor.is_nan() || allocation.divisor <= 0.0 {
        return Err(AnalyticsError::DivisionByZero {
            metric: "allocated_support_cost",
        });
    }

    Ok(orders
        .iter()
        .map(|o| {
            let support = support_costs.get(&o.customer_id).copied().unwrap_or(0.0);
            let allocated_support_cost = support / allocation.divisor;
            OrderProfit {
                order_id: o.order_id,
                customer_id: o.customer_id,
                net_revenue: o.net_revenue,
                total_cost: o.total_cost,
                returns: o.returns,
                allocated_support_cost,
                true_profit: o.net_revenue - o.total_cost - o.returns - allocated_support_cost,
            }
        })
        .collect())
}

/// Roll order rows up to one row per customer, ordered by customer id.
/// Customers without orders never appear because the input is order-driven.
pub fn aggregate_customers(
    orders: &[OrderFinancials],
    names: &HashMap<CustomerId, String>,
) -> Vec<CustomerProfit> {
    let mut by_customer: BTreeMap<CustomerId, CustomerProfit> = BTreeMap::new();

    for o in orders {
        let entry = by_customer
            .entry(o.customer_id)
            .or_insert_with(|| CustomerProfit {
                customer_id: o.customer_id,
                customer_name: names.get(&o.customer_id).cloned().unwrap_or_default(),
                order_count: 0,
                gross_revenue: 0.0,
                total_revenue: 0.0,
                total_cost: 0.0,
                total_returns: 0.0,
                total_profit: 0.0,
            });
        entry.order_count += 1;
        entry.gross_revenue += o.gross_revenue;
        entry.total_revenue += o.net_revenue;
        entry.total_cost += o.total_cost;
        entry.total_returns += o.returns;
    }

    by_customer
        .into_values()
        .map(|mut c| {
            c.total_profit = c.total_revenue - c.total_cost - c.total_returns;
            c
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(
        order_id: OrderId,
        customer_id: CustomerId,
        gross: Money,
        cost: Money,
        discount: f64,
        returns: Money,
    ) -> OrderFinancials {
        OrderFinancials {
            order_id,
            customer_id,
            discount_percent: discount,
            item_count: 1,
            gross_revenue: gross,
            total_cost: cost,
            net_revenue: net_revenue(gross, discount),
            returns,
        }
    }

    #[test]
    fn discount_applies_to_whole_order() {
        assert_eq!(net_revenue(500.0, 10.0), 450.0);
        assert_eq!(net_revenue(500.0, 0.0), 500.0);
        assert_eq!(net_revenue(200.0, 20.0), 160.0);
    }

    #[test]
    fn support_charge_is_per_order_not_split() {
        let orders = vec![
            order(1, 7, 500.0, 300.0, 10.0, 50.0),
            order(2, 7, 100.0, 80.0, 0.0, 0.0),
        ];
        let support = HashMap::from([(7, 200.0)]);
        let profits =
            allocate_support_costs(&orders, &support, &SupportAllocation::default()).unwrap();

        assert_eq!(profits[0].allocated_support_cost, 20.0);
        assert_eq!(profits[1].allocated_support_cost, 20.0);
        assert!((profits[0].true_profit - 80.0).abs() < 1e-9);
        assert!((profits[1].true_profit - 0.0).abs() < 1e-9);
    }

    #[test]
    fn customers_without_tickets_pay_no_support() {
        let orders = vec![order(1, 3, 100.0, 40.0, 0.0, 0.0)];
        let profits =
            allocate_support_costs(&orders, &HashMap::new(), &SupportAllocation::default())
                .unwrap();
        assert_eq!(profits[0].allocated_support_cost, 0.0);
        assert_eq!(profits[0].true_profit, 60.0);
    }

    #[test]
    fn zero_divisor_is_rejected() {
        let orders = vec![order(1, 3, 100.0, 40.0, 0.0, 0.0)];
        let err = allocate_support_costs(
            &orders,
            &HashMap::new(),
            &SupportAllocation { divisor: 0.0 },
        )
        .unwrap_err();
        assert!(matches!(err, AnalyticsError::DivisionByZero { .. }));
    }

    #[test]
    fn customer_rollup_sums_orders() {
        let orders = vec![
            order(1, 1, 500.0, 300.0, 10.0, 50.0),
            order(2, 2, 100.0, 50.0, 0.0, 0.0),
            order(3, 1, 200.0, 100.0, 0.0, 0.0),
        ];
        let names = HashMap::from([(1, "Acme".to_string()), (2, "Globex".to_string())]);
        let customers = aggregate_customers(&orders, &names);

        assert_eq!(customers.len(), 2);
        let acme = &customers[0];
        assert_eq!(acme.customer_name, "Acme");
        assert_eq!(acme.order_count, 2);
        assert_eq!(acme.gross_revenue, 700.0);
        assert_eq!(acme.total_revenue, 650.0);
        assert_eq!(acme.total_cost, 400.0);
        assert_eq!(acme.total_returns, 50.0);
        assert_eq!(acme.total_profit, 200.0);
        assert_eq!(acme.gross_profit(), 300.0);
    }
}
