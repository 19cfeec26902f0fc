// Data models — Rust structs that map to database rows.
//
// Kept apart from the queries so the rest of the crate (report sinks,
// terminal output) can use them without depending on rusqlite.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;

/// A message the user chose to report, with the verdict it received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: i64,
    pub message: String,
    /// Status string at report time (safe / suspicious / dangerous)
    pub status: String,
    pub risk_score: u8,
    /// 1 = phishing, 0 = benign
    pub label: u8,
    /// The full analysis (JSON-encoded in the DB)
    pub analysis: AnalysisResult,
    pub reported_at: String,
}

/// Number of stored reports per status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}
