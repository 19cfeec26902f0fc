// Database trait — async interface for the report store.
//
// SqliteDatabase is the only backend today. Methods are async so a sync
// backend (rusqlite behind a Mutex) and a future native-async one fit
// behind the same interface, and so StoreSink can hold `Arc<dyn Database>`.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{ReportRecord, StatusCount};
use crate::analysis::AnalysisResult;

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Reported messages ---

    /// Store a reported message with its analysis and return the new ID.
    async fn insert_report(&self, message: &str, analysis: &AnalysisResult) -> Result<i64>;

    /// Load a single report by ID.
    async fn get_report(&self, id: i64) -> Result<Option<ReportRecord>>;

    /// Most recent reports first.
    async fn get_recent_reports(&self, limit: u32) -> Result<Vec<ReportRecord>>;

    /// Report counts grouped by status, most severe first.
    async fn count_by_status(&self) -> Result<Vec<StatusCount>>;
}
