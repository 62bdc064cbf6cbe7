//! Per-metric entry points over a loaded store, and the bundled report.
//!
//! The aggregator borrows the store and the config; it owns nothing. Every
//! metric reads the order population chosen by `EmptyOrderPolicy`.

use crate::{
    config::AnalyticsConfig,
    error::AnalyticsResult,
    financials::{
        aggregate_customers, allocate_support_costs, CustomerProfit, OrderFinancials, OrderProfit,
    },
    kpi::{customer_margins, margin_views, CustomerMargin, KpiSummary},
    pareto::{customers_to_reach, pareto, CustomerRevenue, ParetoRow},
    ranking::{rank_descending, Ranked},
    risk::{RiskModel, RiskScore},
    store::ProfitStore,
};
use serde::{Deserialize, Serialize};

/// Cumulative revenue share used for the headline concentration figure.
pub const PARETO_SHARE_PERCENT: f64 = 80.0;

pub struct ProfitabilityAggregator<'a> {
    store: &'a ProfitStore,
    config: &'a AnalyticsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityReport {
    pub kpis: KpiSummary,
    pub customer_count: usize,
    pub order_count: usize,
    pub top_customers: Vec<Ranked<CustomerProfit>>,
    pub top_margins: Vec<CustomerMargin>,
    pub bottom_margins: Vec<CustomerMargin>,
    pub pareto: Vec<ParetoRow>,
    /// Leading customers needed to reach 80% of revenue.
    pub pareto_80_customers: usize,
    pub riskiest_customers: Vec<RiskScore>,
    pub order_profits: Vec<OrderProfit>,
    pub table_counts: Vec<(String, i64)>,
}

impl<'a> ProfitabilityAggregator<'a> {
    pub fn new(store: &'a ProfitStore, config: &'a AnalyticsConfig) -> Self {
        Self { store, config }
    }

    fn include_empty(&self) -> bool {
        self.config.empty_orders.includes_empty()
    }

    pub fn order_financials(&self) -> AnalyticsResult<Vec<OrderFinancials>> {
        self.store.order_financials(self.include_empty())
    }

    /// True profit per order, ordered by order id.
    pub fn order_profits(&self) -> AnalyticsResult<Vec<OrderProfit>> {
        let orders = self.order_financials()?;
        let support = self.store.customer_support_costs()?;
        allocate_support_costs(&orders, &support, &self.config.support_allocation)
    }

    /// Customer totals ordered by customer id.
    pub fn customer_totals(&self) -> AnalyticsResult<Vec<CustomerProfit>> {
        let orders = self.order_financials()?;
        let names = self.store.customer_names()?;
        Ok(aggregate_customers(&orders, &names))
    }

    /// Every customer with orders, ranked by total profit.
    pub fn customer_profits(&self) -> AnalyticsResult<Vec<Ranked<CustomerProfit>>> {
        Ok(rank_descending(
            self.customer_totals()?,
            |c| c.total_profit,
            |c| c.customer_id,
        ))
    }

    pub fn customer_revenues(&self) -> AnalyticsResult<Vec<CustomerRevenue>> {
        Ok(self
            .customer_totals()?
            .into_iter()
            .map(|c| CustomerRevenue {
                customer_id: c.customer_id,
                customer_name: c.customer_name,
                revenue: c.gross_revenue,
            })
            .collect())
    }

    pub fn pareto(&self) -> AnalyticsResult<Vec<ParetoRow>> {
        pareto(self.customer_revenues()?)
    }

    pub fn risk_scores(&self) -> AnalyticsResult<Vec<RiskScore>> {
        let customers = self.customer_totals()?;
        let activity = self.store.risk_activity(self.include_empty())?;
        RiskModel::new(self.config.risk.clone()).score_customers(&customers, &activity)
    }

    pub fn kpis(&self) -> AnalyticsResult<KpiSummary> {
        let totals = self.store.item_totals()?;
        KpiSummary::from_totals(totals.total_revenue, totals.total_cost)
    }

    pub fn customer_margins(&self) -> AnalyticsResult<Vec<CustomerMargin>> {
        Ok(customer_margins(&self.customer_totals()?))
    }

    /// Compute every metric over the full population, then truncate to
    /// `top_n` rows for display.
    pub fn report(&self, top_n: usize) -> AnalyticsResult<ProfitabilityReport> {
        let orders = self.order_financials()?;
        let names = self.store.customer_names()?;
        let support = self.store.customer_support_costs()?;
        let customers = aggregate_customers(&orders, &names);

        let kpis = self.kpis()?;

        let margins = customer_margins(&customers);
        let (top_margins, bottom_margins) =
            margin_views(&margins, self.config.report.margin_view_n);

        let revenues = customers
            .iter()
            .map(|c| CustomerRevenue {
                customer_id: c.customer_id,
                customer_name: c.customer_name.clone(),
                revenue: c.gross_revenue,
            })
            .collect();
        let mut pareto_rows = pareto(revenues)?;
        let pareto_80_customers = customers_to_reach(&pareto_rows, PARETO_SHARE_PERCENT);
        pareto_rows.truncate(top_n);

        let activity = self.store.risk_activity(self.include_empty())?;
        let mut riskiest_customers = RiskModel::new(self.config.risk.clone())
            .score_customers(&customers, &activity)?;
        riskiest_customers.truncate(top_n);

        let mut order_profits =
            allocate_support_costs(&orders, &support, &self.config.support_allocation)?;
        order_profits.truncate(top_n);

        let customer_count = customers.len();
        let mut top_customers = rank_descending(customers, |c| c.total_profit, |c| c.customer_id);
        top_customers.truncate(top_n);

        log::info!(
            "report: customers={customer_count} orders={} margin={:.2}% pareto80={pareto_80_customers}",
            orders.len(),
            kpis.profit_margin
        );

        Ok(ProfitabilityReport {
            kpis,
            customer_count,
            order_count: orders.len(),
            top_customers,
            top_margins,
            bottom_margins,
            pareto: pareto_rows,
            pareto_80_customers,
            riskiest_customers,
            order_profits,
            table_counts: self.store.table_counts()?,
        })
    }
}
