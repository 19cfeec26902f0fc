// Report sink trait — where reported messages go.
//
// The analyzer never knows about sinks. A Reporter owns one sink and turns
// its errors into a boolean, so transport failures never reach the caller
// as errors.

use anyhow::Result;
use async_trait::async_trait;

use crate::analysis::AnalysisResult;

/// A destination for reported messages.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Short identifier for logs and `safechat status` (e.g. "log", "http").
    fn name(&self) -> &str;

    /// Deliver one report. Implementations own their own timeouts.
    async fn submit(&self, message: &str, analysis: &AnalysisResult) -> Result<()>;
}
