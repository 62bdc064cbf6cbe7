use crate::error::{AnalyticsError, AnalyticsResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Population sizes and value ranges for the synthetic dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Reference "today". Join, order and ticket dates are drawn backwards from it.
    pub as_of: NaiveDate,
    pub regions: Vec<String>,
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    pub returns: usize,
    pub support_tickets: usize,
    pub customer_history_days: i64,
    pub order_history_days: i64,
    pub items_per_order: (i64, i64),
    pub quantity: (i64, i64),
    pub product_cost: (i64, i64),
    pub product_markup: (i64, i64),
    pub discount_percents: Vec<f64>,
    pub return_amount: (i64, i64),
    pub payment_delay_days: (i64, i64),
    pub payment_amount: (i64, i64),
    pub ticket_cost: (i64, i64),
}

impl GeneratorConfig {
    /// Reject ranges the generator cannot draw from.
    pub fn validate(&self) -> AnalyticsResult<()> {
        let invalid = |reason: String| Err(AnalyticsError::InvalidConfig { reason });

        if self.regions.is_empty() {
            return invalid("generator.regions must not be empty".into());
        }
        if self.orders > 0 && (self.customers == 0 || self.products == 0) {
            return invalid("orders need at least one customer and one product".into());
        }
        if self.returns > 0 && self.orders == 0 {
            return invalid("returns need at least one order".into());
        }
        if self.support_tickets > 0 && self.customers == 0 {
            return invalid("support tickets need at least one customer".into());
        }
        if self.discount_percents.is_empty() {
            return invalid("generator.discount_percents must not be empty".into());
        }
        if let Some(d) = self
            .discount_percents
            .iter()
            .find(|d| !(0.0..=100.0).contains(*d))
        {
            return invalid(format!("discount percent {d} outside [0, 100]"));
        }
        let ranges = [
            ("items_per_order", self.items_per_order),
            ("quantity", self.quantity),
            ("product_cost", self.product_cost),
            ("product_markup", self.product_markup),
            ("return_amount", self.return_amount),
            ("payment_delay_days", self.payment_delay_days),
            ("payment_amount", self.payment_amount),
            ("ticket_cost", self.ticket_cost),
        ];
        for (name, (lo, hi)) in ranges {
            if lo > hi || lo < 0 {
                return invalid(format!("generator.{name} range [{lo}, {hi}] is invalid"));
            }
        }
        if self.customer_history_days < 0 || self.order_history_days < 0 {
            return invalid("history windows must be non-negative".into());
        }
        Ok(())
    }
}

/// Weights of the linear customer risk model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskWeights {
    pub payment_delay: f64,
    pub return_ratio: f64,
    /// Return ratio is scaled to a percentage before weighting.
    pub return_ratio_scale: f64,
    pub support_tickets: f64,
    /// Flat amount added when gross profit (revenue - cost) is negative.
    pub unprofitable_penalty: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            payment_delay: 0.3,
            return_ratio: 0.3,
            return_ratio_scale: 100.0,
            support_tickets: 0.2,
            unprofitable_penalty: 20.0,
        }
    }
}

/// How a customer's support cost is charged against their orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupportAllocation {
    /// Each order is charged `customer_total_support_cost / divisor`.
    /// The amount is not split by order count.
    pub divisor: f64,
}

impl Default for SupportAllocation {
    fn default() -> Self {
        Self { divisor: 10.0 }
    }
}

/// Treatment of orders that have no order_items rows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyOrderPolicy {
    /// Orders without items are left out of every metric.
    #[default]
    Exclude,
    /// Orders without items count with zero revenue and zero cost.
    Zero,
}

impl EmptyOrderPolicy {
    pub fn includes_empty(self) -> bool {
        matches!(self, Self::Zero)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Rows shown in ranked views. Ranking itself always covers the full population.
    pub top_n: usize,
    /// Rows shown in the top/bottom customer margin views.
    pub margin_view_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 20,
            margin_view_n: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub risk: RiskWeights,
    #[serde(default)]
    pub support_allocation: SupportAllocation,
    #[serde(default)]
    pub empty_orders: EmptyOrderPolicy,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct AnalyticsConfigFile {
    generator: GeneratorConfig,
    #[serde(default)]
    risk: RiskWeights,
    #[serde(default)]
    support_allocation: SupportAllocation,
    #[serde(default)]
    empty_orders: EmptyOrderPolicy,
    #[serde(default)]
    report: ReportConfig,
}

impl AnalyticsConfig {
    /// Load from a JSON file (see data/analytics_config.json).
    /// In tests, use AnalyticsConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: AnalyticsConfigFile = serde_json::from_str(&content)?;
        let config = Self {
            generator: file.generator,
            risk: file.risk,
            support_allocation: file.support_allocation,
            empty_orders: file.empty_orders,
            report: file.report,
        };
        config.validate()?;
        log::debug!(
            "config: loaded {path} (customers={}, orders={})",
            config.generator.customers,
            config.generator.orders
        );
        Ok(config)
    }

    /// Reject values that would make a metric undefined or a generator range empty.
    pub fn validate(&self) -> AnalyticsResult<()> {
        let invalid = |reason: String| Err(AnalyticsError::InvalidConfig { reason });

        let divisor = self.support_allocation.divisor;
        if divisor.is_nan() || divisor <= 0.0 {
            return invalid(format!(
                "support_allocation.divisor must be > 0, got {divisor}"
            ));
        }
        self.generator.validate()
    }

    /// Minimal config for fast tests: same value ranges, small population.
    pub fn default_test() -> Self {
        let mut config = Self::default();
        config.generator.customers = 40;
        config.generator.products = 12;
        config.generator.orders = 200;
        config.generator.returns = 30;
        config.generator.support_tickets = 120;
        config
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig {
                as_of: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
                regions: ["North", "South", "East", "West"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                customers: 500,
                products: 50,
                orders: 3000,
                returns: 500,
                support_tickets: 2000,
                customer_history_days: 3 * 365,
                order_history_days: 2 * 365,
                items_per_order: (1, 3),
                quantity: (1, 5),
                product_cost: (50, 500),
                product_markup: (20, 300),
                discount_percents: vec![0.0, 5.0, 10.0, 15.0, 20.0],
                return_amount: (20, 300),
                payment_delay_days: (0, 30),
                payment_amount: (100, 1000),
                ticket_cost: (10, 200),
            },
            risk: RiskWeights::default(),
            support_allocation: SupportAllocation::default(),
            empty_orders: EmptyOrderPolicy::default(),
            report: ReportConfig::default(),
        }
    }
}
