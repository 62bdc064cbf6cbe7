pub mod aggregator;
pub mod config;
pub mod dataset;
pub mod error;
pub mod financials;
pub mod generator;
pub mod kpi;
pub mod name_generator;
pub mod pareto;
pub mod ranking;
pub mod risk;
pub mod rng;
pub mod store;
pub mod types;
