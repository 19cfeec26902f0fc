// Reporting side-channel — hand a message and its analysis to a sink.
//
// ReportSink is the swap-ready abstraction (log, local store, remote
// backend). Reporter wraps one sink and exposes the boolean contract the
// client relies on: `true` when delivered, `false` on any transport
// failure, which callers present as a retryable error.

pub mod http;
pub mod log;
pub mod store;
pub mod traits;

use tracing::{info, warn};

use crate::analysis::AnalysisResult;
use traits::ReportSink;

pub struct Reporter {
    sink: Box<dyn ReportSink>,
}

impl Reporter {
    pub fn new(sink: Box<dyn ReportSink>) -> Self {
        Self { sink }
    }

    /// Reporter that only logs; the reference behavior.
    pub fn logging() -> Self {
        Self::new(Box::new(log::LogSink))
    }

    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }

    /// Submit a report. Sink errors are logged and returned as `false`.
    ///
    /// The analysis is only borrowed, so dropping this future midway
    /// leaves the caller's result untouched.
    pub async fn report(&self, message: &str, analysis: &AnalysisResult) -> bool {
        match self.sink.submit(message, analysis).await {
            Ok(()) => {
                info!(
                    sink = self.sink.name(),
                    status = %analysis.status,
                    risk_score = analysis.risk_score(),
                    "Report submitted"
                );
                true
            }
            Err(e) => {
                warn!(sink = self.sink.name(), error = %e, "Report submission failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use anyhow::Result;
    use async_trait::async_trait;

    struct FailingSink;

    #[async_trait]
    impl ReportSink for FailingSink {
        fn name(&self) -> &str {
            "failing"
        }

        async fn submit(&self, _message: &str, _analysis: &AnalysisResult) -> Result<()> {
            anyhow::bail!("connection reset")
        }
    }

    #[tokio::test]
    async fn test_log_sink_always_succeeds() {
        let reporter = Reporter::logging();
        assert_eq!(reporter.sink_name(), "log");
        let analysis = analyze("");
        assert!(reporter.report("", &analysis).await);
    }

    #[tokio::test]
    async fn test_sink_error_becomes_false() {
        let reporter = Reporter::new(Box::new(FailingSink));
        let message = "Click here http://bit.ly/x";
        let analysis = analyze(message);
        let before = analysis.clone();

        assert!(!reporter.report(message, &analysis).await);
        assert_eq!(analysis, before);
    }
}
