// Log sink — writes reports to the tracing output and always succeeds.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use super::traits::ReportSink;
use crate::analysis::AnalysisResult;
use crate::output::truncate_chars;

pub struct LogSink;

#[async_trait]
impl ReportSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    async fn submit(&self, message: &str, analysis: &AnalysisResult) -> Result<()> {
        info!(
            status = %analysis.status,
            risk_score = analysis.risk_score(),
            threats = ?analysis.threats,
            message = %truncate_chars(message, 80),
            "Message reported"
        );
        Ok(())
    }
}
