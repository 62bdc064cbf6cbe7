//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Analytics modules receive rows from store methods; they never execute SQL.

use crate::error::{AnalyticsError, AnalyticsResult};
use rusqlite::{Connection, OpenFlags, OptionalExtension};

mod dataset;
mod financials;
mod risk;

pub use financials::ItemTotals;

pub struct ProfitStore {
    conn: Connection,
}

impl ProfitStore {
    pub fn open(path: &str) -> AnalyticsResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an existing database for analytics only. Writes fail at the SQLite level.
    pub fn open_read_only(path: &str) -> AnalyticsResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> AnalyticsResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> AnalyticsResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_schema.sql"))?;
        Ok(())
    }

    // ── Inspection ────────────────────────────────────────────────

    /// Every user table with its row count, ordered by table name.
    pub fn table_counts(&self) -> AnalyticsResult<Vec<(String, i64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        tables
            .into_iter()
            .map(|table| -> AnalyticsResult<(String, i64)> {
                let count: i64 = self.conn.query_row(
                    &format!("SELECT COUNT(*) FROM \"{}\"", table.replace('"', "\"\"")),
                    [],
                    |row| row.get(0),
                )?;
                Ok((table, count))
            })
            .collect()
    }

    pub fn row_count(&self, table: &str) -> AnalyticsResult<i64> {
        Ok(self
            .table_counts()?
            .into_iter()
            .find(|(name, _)| name == table)
            .map(|(_, count)| count)
            .unwrap_or(0))
    }

    // ── Integrity ─────────────────────────────────────────────────

    /// Scan for dangling foreign keys. Databases written by other tools may
    /// have been loaded with foreign_keys=OFF; a gap would otherwise surface
    /// later as silently missing aggregates.
    pub fn verify_integrity(&self) -> AnalyticsResult<()> {
        const CHECKS: &[(&str, &str, &str)] = &[
            (
                "customers",
                "region",
                "SELECT c.customer_id, c.region_id FROM customers c
                 LEFT JOIN regions r ON r.region_id = c.region_id
                 WHERE r.region_id IS NULL ORDER BY c.customer_id LIMIT 1",
            ),
            (
                "orders",
                "customer",
                "SELECT o.order_id, o.customer_id FROM orders o
                 LEFT JOIN customers c ON c.customer_id = o.customer_id
                 WHERE c.customer_id IS NULL ORDER BY o.order_id LIMIT 1",
            ),
            (
                "order_items",
                "order",
                "SELECT oi.order_item_id, oi.order_id FROM order_items oi
                 LEFT JOIN orders o ON o.order_id = oi.order_id
                 WHERE o.order_id IS NULL ORDER BY oi.order_item_id LIMIT 1",
            ),
            (
                "order_items",
                "product",
                "SELECT oi.order_item_id, oi.product_id FROM order_items oi
                 LEFT JOIN products p ON p.product_id = oi.product_id
                 WHERE p.product_id IS NULL ORDER BY oi.order_item_id LIMIT 1",
            ),
            (
                "returns",
                "order",
                "SELECT r.return_id, r.order_id FROM returns r
                 LEFT JOIN orders o ON o.order_id = r.order_id
                 WHERE o.order_id IS NULL ORDER BY r.return_id LIMIT 1",
            ),
            (
                "payments",
                "order",
                "SELECT p.payment_id, p.order_id FROM payments p
                 LEFT JOIN orders o ON o.order_id = p.order_id
                 WHERE o.order_id IS NULL ORDER BY p.payment_id LIMIT 1",
            ),
            (
                "support_tickets",
                "customer",
                "SELECT t.ticket_id, t.customer_id FROM support_tickets t
                 LEFT JOIN customers c ON c.customer_id = t.customer_id
                 WHERE c.customer_id IS NULL ORDER BY t.ticket_id LIMIT 1",
            ),
        ];

        for &(table, target, sql) in CHECKS {
            let orphan: Option<(i64, Option<i64>)> = self
                .conn
                .query_row(sql, [], |row| Ok((row.get(0)?, row.get(1)?)))
                .optional()?;
            if let Some((id, target_id)) = orphan {
                let target_id = target_id.map_or_else(|| "NULL".to_string(), |t| t.to_string());
                log::warn!("integrity: {table} {id} references missing {target} {target_id}");
                return Err(AnalyticsError::DataIntegrity {
                    table,
                    id,
                    detail: format!("references missing {target} {target_id}"),
                });
            }
        }
        Ok(())
    }
}
