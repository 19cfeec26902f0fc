// Store sink — persists reports to the local report store.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::traits::ReportSink;
use crate::analysis::AnalysisResult;
use crate::db::Database;

pub struct StoreSink {
    db: Arc<dyn Database>,
}

impl StoreSink {
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportSink for StoreSink {
    fn name(&self) -> &str {
        "store"
    }

    async fn submit(&self, message: &str, analysis: &AnalysisResult) -> Result<()> {
        let id = self.db.insert_report(message, analysis).await?;
        debug!(id, status = %analysis.status, "Report stored");
        Ok(())
    }
}
