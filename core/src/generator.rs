//! Synthetic retail dataset generator.
//!
//! Fabricates a schema-conformant Dataset from a master seed and a
//! GeneratorConfig. Every table draws from its own RNG stream (see rng.rs),
//! and all dates are measured from `as_of`, never from the wall clock, so
//! the same seed always yields the same dataset.

use crate::{
    config::GeneratorConfig,
    dataset::{
        Customer, Dataset, Order, OrderItem, Payment, Product, Region, ReturnRecord,
        SupportTicket,
    },
    error::AnalyticsResult,
    name_generator::NameGenerator,
    rng::{RngBank, TableRng, TableSlot},
    types::RowId,
};
use chrono::{Duration, NaiveDate};

pub struct DatasetGenerator {
    config: GeneratorConfig,
    rng_bank: RngBank,
}

impl DatasetGenerator {
    pub fn new(seed: u64, config: GeneratorConfig) -> Self {
        Self {
            config,
            rng_bank: RngBank::new(seed),
        }
    }

    /// Build the full dataset. Ids are 1-based and dense per table.
    pub fn generate(&self) -> AnalyticsResult<Dataset> {
        self.config.validate()?;

        let regions = self.regions();
        let customers = self.customers(regions.len());
        let products = self.products();
        let orders = self.orders();
        let order_items = self.order_items();
        let returns = self.returns();
        let payments = self.payments(&orders);
        let support_tickets = self.support_tickets();

        let dataset = Dataset {
            regions,
            customers,
            products,
            orders,
            order_items,
            returns,
            payments,
            support_tickets,
        };
        dataset.validate()?;

        log::info!(
            "generator: {} customers, {} products, {} orders, {} items, {} returns, {} payments, {} tickets",
            dataset.customers.len(),
            dataset.products.len(),
            dataset.orders.len(),
            dataset.order_items.len(),
            dataset.returns.len(),
            dataset.payments.len(),
            dataset.support_tickets.len(),
        );
        Ok(dataset)
    }

    fn regions(&self) -> Vec<Region> {
        self.config
            .regions
            .iter()
            .enumerate()
            .map(|(i, name)| Region {
                region_id: i as RowId + 1,
                region_name: name.clone(),
            })
            .collect()
    }

    fn customers(&self, region_count: usize) -> Vec<Customer> {
        let mut rng = self.rng_bank.for_table(TableSlot::Customer);
        (1..=self.config.customers as RowId)
            .map(|customer_id| Customer {
                customer_id,
                customer_name: NameGenerator::generate_company_name(&mut rng),
                region_id: rng.int_between(1, region_count as i64),
                join_date: self.date_within(&mut rng, self.config.customer_history_days),
            })
            .collect()
    }

    fn products(&self) -> Vec<Product> {
        let mut rng = self.rng_bank.for_table(TableSlot::Product);
        let (cost_lo, cost_hi) = self.config.product_cost;
        let (markup_lo, markup_hi) = self.config.product_markup;
        (1..=self.config.products as RowId)
            .map(|product_id| {
                let product_name = NameGenerator::generate_product_name(&mut rng);
                let cost = rng.int_between(cost_lo, cost_hi);
                let selling = cost + rng.int_between(markup_lo, markup_hi);
                Product {
                    product_id,
                    product_name,
                    cost_price: cost as f64,
                    selling_price: selling as f64,
                }
            })
            .collect()
    }

    fn orders(&self) -> Vec<Order> {
        let mut rng = self.rng_bank.for_table(TableSlot::Order);
        (1..=self.config.orders as RowId)
            .map(|order_id| Order {
                order_id,
                customer_id: rng.int_between(1, self.config.customers as i64),
                order_date: self.date_within(&mut rng, self.config.order_history_days),
                discount_percent: *rng.pick(&self.config.discount_percents),
            })
            .collect()
    }

    fn order_items(&self) -> Vec<OrderItem> {
        let mut rng = self.rng_bank.for_table(TableSlot::OrderItem);
        let (items_lo, items_hi) = self.config.items_per_order;
        let (qty_lo, qty_hi) = self.config.quantity;
        let mut items = Vec::with_capacity(self.config.orders * items_hi.max(1) as usize);
        let mut next_id: RowId = 1;
        for order_id in 1..=self.config.orders as RowId {
            for _ in 0..rng.int_between(items_lo, items_hi) {
                items.push(OrderItem {
                    order_item_id: next_id,
                    order_id,
                    product_id: rng.int_between(1, self.config.products as i64),
                    quantity: rng.int_between(qty_lo, qty_hi),
                });
                next_id += 1;
            }
        }
        items
    }

    fn returns(&self) -> Vec<ReturnRecord> {
        let mut rng = self.rng_bank.for_table(TableSlot::Return);
        let (lo, hi) = self.config.return_amount;
        (1..=self.config.returns as RowId)
            .map(|return_id| ReturnRecord {
                return_id,
                order_id: rng.int_between(1, self.config.orders as i64),
                return_amount: rng.int_between(lo, hi) as f64,
            })
            .collect()
    }

    /// One payment per order, settled 0..=30 days (by default) after the order.
    fn payments(&self, orders: &[Order]) -> Vec<Payment> {
        let mut rng = self.rng_bank.for_table(TableSlot::Payment);
        let (delay_lo, delay_hi) = self.config.payment_delay_days;
        let (amount_lo, amount_hi) = self.config.payment_amount;
        orders
            .iter()
            .map(|order| {
                let delay = rng.int_between(delay_lo, delay_hi);
                Payment {
                    payment_id: order.order_id,
                    order_id: order.order_id,
                    payment_date: order.order_date + Duration::days(delay),
                    amount_paid: rng.int_between(amount_lo, amount_hi) as f64,
                }
            })
            .collect()
    }

    fn support_tickets(&self) -> Vec<SupportTicket> {
        let mut rng = self.rng_bank.for_table(TableSlot::SupportTicket);
        let (lo, hi) = self.config.ticket_cost;
        (1..=self.config.support_tickets as RowId)
            .map(|ticket_id| SupportTicket {
                ticket_id,
                customer_id: rng.int_between(1, self.config.customers as i64),
                ticket_date: self.date_within(&mut rng, self.config.order_history_days),
                resolution_cost: rng.int_between(lo, hi) as f64,
            })
            .collect()
    }

    /// A date in [as_of - window_days, as_of].
    fn date_within(&self, rng: &mut TableRng, window_days: i64) -> NaiveDate {
        self.config.as_of - Duration::days(rng.int_between(0, window_days))
    }
}
