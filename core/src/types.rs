//! Shared primitive types used across the aggregator.

/// Primary key of a row in any of the dataset tables.
pub type RowId = i64;

pub type RegionId = RowId;
pub type CustomerId = RowId;
pub type ProductId = RowId;
pub type OrderId = RowId;

/// Monetary amount. All money in the dataset is stored as SQLite REAL.
pub type Money = f64;
