//! SQLite fact store.
//!
//! RULE: only the store modules talk to the database. The catalog builds
//! SQL text plus positional parameters and hands them to the accessor
//! here together with a row mapper — it never owns a connection.
//!
//! The store handle is an explicitly owned resource: callers open it,
//! inject a borrow into the catalogs, and close it. There is no lazily
//! initialized process-wide connection.

use crate::error::{InsightsError, InsightsResult};
use rusqlite::{Connection, Params};

mod loader;

/// The nine fact tables the administrative surface may touch.
pub const FACT_TABLES: [&str; 9] = [
    "aggregated_transaction",
    "aggregated_user",
    "aggregated_insurance",
    "map_transaction",
    "map_user",
    "map_insurance",
    "top_transaction",
    "top_user",
    "top_insurance",
];

pub struct FactStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for a file
}

impl FactStore {
    /// Open (or create) the fact database at `path`.
    pub fn open(path: &str) -> InsightsResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> InsightsResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases, this returns a new in-memory database (isolated).
    /// For file-based databases, this opens the same file.
    pub fn reopen(&self) -> InsightsResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> InsightsResult<()> {
        self.conn
            .execute_batch(include_str!("../migrations/001_fact_tables.sql"))?;
        Ok(())
    }

    /// Close the connection explicitly. Dropping the store also closes it;
    /// this variant surfaces close-time errors instead of discarding them.
    pub fn close(self) -> InsightsResult<()> {
        self.conn.close().map_err(|(_, e)| InsightsError::Database(e))
    }

    // ── Accessor ───────────────────────────────────────────────

    /// Run a read-only aggregation and map every returned row.
    /// An empty result set is `Ok(vec![])`, never an error.
    pub fn query_rows<T, P, F>(&self, sql: &str, params: P, mapper: F) -> InsightsResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, mapper)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Run an aggregation that always yields exactly one row
    /// (ungrouped SELECT over aggregate functions).
    pub fn query_row<T, P, F>(&self, sql: &str, params: P, mapper: F) -> InsightsResult<T>
    where
        P: Params,
        F: FnOnce(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        self.conn.query_row(sql, params, mapper).map_err(Into::into)
    }

    // ── Administrative ─────────────────────────────────────────

    fn known_table(name: &str) -> InsightsResult<()> {
        if FACT_TABLES.contains(&name) {
            Ok(())
        } else {
            Err(InsightsError::UnknownTable {
                name: name.to_string(),
            })
        }
    }

    pub fn table_row_count(&self, table: &str) -> InsightsResult<i64> {
        Self::known_table(table)?;
        // Table name is whitelisted above; bind parameters cannot name tables.
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .map_err(Into::into)
    }

    pub fn clear_table(&self, table: &str) -> InsightsResult<()> {
        Self::known_table(table)?;
        self.conn.execute(&format!("DELETE FROM {table}"), [])?;
        log::info!("cleared fact table {table}");
        Ok(())
    }

    pub fn drop_table(&self, table: &str) -> InsightsResult<()> {
        Self::known_table(table)?;
        self.conn
            .execute(&format!("DROP TABLE IF EXISTS {table}"), [])?;
        log::info!("dropped fact table {table}");
        Ok(())
    }
}
