// Database schema — table creation and versioning.
//
// A `schema_version` table records the applied version so later
// migrations can be added without guessing at the current layout.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Tracks schema version for future migrations
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Messages the user reported, with the verdict they received
        CREATE TABLE IF NOT EXISTS reported_messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            message TEXT NOT NULL,
            status TEXT NOT NULL,              -- safe / suspicious / dangerous
            risk_score INTEGER NOT NULL,       -- 0 to 100
            label INTEGER NOT NULL,            -- 1 = phishing, 0 = benign
            analysis_json TEXT NOT NULL,       -- full AnalysisResult
            reported_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Index for status breakdowns
        CREATE INDEX IF NOT EXISTS idx_reports_status
            ON reported_messages(status);

        -- Index for listing the most recent reports
        CREATE INDEX IF NOT EXISTS idx_reports_age
            ON reported_messages(reported_at);
        ",
    )
    .context("Failed to create database tables")?;

    // Record initial schema version if not already set
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [1],
    )?;

    Ok(())
}

/// Count user tables (excludes SQLite internals).
pub fn table_count(conn: &Connection) -> Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
        assert_eq!(table_count(&conn).unwrap(), 2);
    }

    #[test]
    fn test_schema_version_recorded() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }
}
