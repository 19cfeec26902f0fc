// SqliteDatabase — rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{ReportRecord, StatusCount};
use super::traits::Database;
use crate::analysis::AnalysisResult;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn insert_report(&self, message: &str, analysis: &AnalysisResult) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_report(&conn, message, analysis)
    }

    async fn get_report(&self, id: i64) -> Result<Option<ReportRecord>> {
        let conn = self.conn.lock().await;
        super::queries::get_report(&conn, id)
    }

    async fn get_recent_reports(&self, limit: u32) -> Result<Vec<ReportRecord>> {
        let conn = self.conn.lock().await;
        super::queries::get_recent_reports(&conn, limit)
    }

    async fn count_by_status(&self) -> Result<Vec<StatusCount>> {
        let conn = self.conn.lock().await;
        super::queries::count_by_status(&conn)
    }
}
