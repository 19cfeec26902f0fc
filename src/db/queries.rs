// Database queries — CRUD operations for reported messages.
//
// Every SQL statement lives here. SqliteDatabase wraps these functions
// behind the async Database trait.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{ReportRecord, StatusCount};
use crate::analysis::AnalysisResult;

const REPORT_COLUMNS: &str =
    "id, message, status, risk_score, label, analysis_json, reported_at";

/// Store a reported message and return its row ID.
pub fn insert_report(conn: &Connection, message: &str, analysis: &AnalysisResult) -> Result<i64> {
    let analysis_json = serde_json::to_string(analysis)?;
    conn.execute(
        "INSERT INTO reported_messages (message, status, risk_score, label, analysis_json, reported_at)
         VALUES (?1, ?2, ?3, ?4, ?5, datetime('now'))",
        params![
            message,
            analysis.status.as_str(),
            analysis.risk_score(),
            analysis.status.label(),
            analysis_json,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Load a single report by ID.
pub fn get_report(conn: &Connection, id: i64) -> Result<Option<ReportRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {REPORT_COLUMNS} FROM reported_messages WHERE id = ?1"
    ))?;
    let row = stmt.query_row(params![id], read_report_row).optional()?;
    row.map(into_record).transpose()
}

/// Most recent reports first. Ties on timestamp fall back to insertion order.
pub fn get_recent_reports(conn: &Connection, limit: u32) -> Result<Vec<ReportRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {REPORT_COLUMNS} FROM reported_messages
         ORDER BY reported_at DESC, id DESC
         LIMIT ?1"
    ))?;
    let rows = stmt
        .query_map(params![limit], read_report_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(into_record).collect()
}

/// Report counts grouped by status, most severe first.
pub fn count_by_status(conn: &Connection) -> Result<Vec<StatusCount>> {
    let mut stmt = conn.prepare(
        "SELECT status, COUNT(*) FROM reported_messages
         GROUP BY status
         ORDER BY CASE status
            WHEN 'dangerous' THEN 0
            WHEN 'suspicious' THEN 1
            ELSE 2
         END",
    )?;
    let counts = stmt
        .query_map([], |row| {
            Ok(StatusCount {
                status: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(counts)
}

/// Raw column values; the analysis JSON is decoded outside the rusqlite
/// closure so decode failures surface as anyhow errors with context.
struct ReportRow {
    id: i64,
    message: String,
    status: String,
    risk_score: u8,
    label: u8,
    analysis_json: String,
    reported_at: String,
}

fn read_report_row(row: &Row<'_>) -> rusqlite::Result<ReportRow> {
    Ok(ReportRow {
        id: row.get(0)?,
        message: row.get(1)?,
        status: row.get(2)?,
        risk_score: row.get(3)?,
        label: row.get(4)?,
        analysis_json: row.get(5)?,
        reported_at: row.get(6)?,
    })
}

fn into_record(row: ReportRow) -> Result<ReportRecord> {
    let analysis: AnalysisResult = serde_json::from_str(&row.analysis_json)
        .with_context(|| format!("Corrupt analysis JSON for report {}", row.id))?;
    Ok(ReportRecord {
        id: row.id,
        message: row.message,
        status: row.status,
        risk_score: row.risk_score,
        label: row.label,
        analysis,
        reported_at: row.reported_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::db::schema::create_tables;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_and_get_report() {
        let conn = test_conn();
        let message = "URGENT: your account has been suspended, click here http://bit.ly/x";
        let analysis = analyze(message);
        let id = insert_report(&conn, message, &analysis).unwrap();

        let record = get_report(&conn, id).unwrap().unwrap();
        assert_eq!(record.message, message);
        assert_eq!(record.status, "dangerous");
        assert_eq!(record.risk_score, 100);
        assert_eq!(record.label, 1);
        assert!(record.analysis.same_verdict(&analysis));
    }

    #[test]
    fn test_get_missing_report() {
        let conn = test_conn();
        assert!(get_report(&conn, 42).unwrap().is_none());
    }

    #[test]
    fn test_recent_reports_newest_first() {
        let conn = test_conn();
        for text in ["first", "second", "third"] {
            insert_report(&conn, text, &analyze(text)).unwrap();
        }
        let recent = get_recent_reports(&conn, 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "third");
        assert_eq!(recent[1].message, "second");
    }

    #[test]
    fn test_count_by_status_orders_by_severity() {
        let conn = test_conn();
        for text in [
            "See you at lunch",
            "Urgent: verify your account",
            "URGENT: your account has been suspended, click here http://bit.ly/x",
        ] {
            insert_report(&conn, text, &analyze(text)).unwrap();
        }
        let counts = count_by_status(&conn).unwrap();
        let statuses: Vec<&str> = counts.iter().map(|c| c.status.as_str()).collect();
        assert_eq!(statuses, vec!["dangerous", "suspicious", "safe"]);
        assert!(counts.iter().all(|c| c.count == 1));
    }

    #[test]
    fn test_corrupt_analysis_json_is_an_error() {
        let conn = test_conn();
        conn.execute(
            "INSERT INTO reported_messages (message, status, risk_score, label, analysis_json)
             VALUES ('x', 'safe', 0, 0, 'not json')",
            [],
        )
        .unwrap();
        let err = get_report(&conn, 1).unwrap_err();
        assert!(err.to_string().contains("Corrupt analysis JSON"));
    }
}
