// Batch pipeline: analyze many messages, optionally report the risky ones.
//
// Analysis is synchronous and cheap, so every message is classified first.
// Only report submission touches the network or the database, and those
// calls run concurrently with a bounded fan-out.

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use crate::analysis::{AnalysisResult, Analyzer, Status};
use crate::report::Reporter;

/// Counts for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub analyzed: usize,
    pub safe: usize,
    pub suspicious: usize,
    pub dangerous: usize,
    pub reported: usize,
    pub report_failures: usize,
}

impl BatchSummary {
    fn record(&mut self, status: Status) {
        self.analyzed += 1;
        match status {
            Status::Safe => self.safe += 1,
            Status::Suspicious => self.suspicious += 1,
            Status::Dangerous => self.dangerous += 1,
        }
    }
}

/// Run the batch pipeline.
///
/// Returns each message with its analysis (input order) plus the summary.
/// With `report_flagged`, every non-safe result goes to the reporter,
/// `concurrency` at a time.
pub async fn run(
    analyzer: &Analyzer,
    reporter: &Reporter,
    messages: &[String],
    report_flagged: bool,
    concurrency: usize,
) -> (Vec<AnalysisResult>, BatchSummary) {
    let mut summary = BatchSummary::default();

    let results: Vec<AnalysisResult> = messages
        .iter()
        .map(|message| {
            let result = analyzer.analyze(message);
            summary.record(result.status);
            result
        })
        .collect();

    if !report_flagged {
        return (results, summary);
    }

    let flagged: Vec<(&String, &AnalysisResult)> = messages
        .iter()
        .zip(&results)
        .filter(|(_, r)| r.status.is_flagged())
        .collect();

    if flagged.is_empty() {
        return (results, summary);
    }

    info!(
        count = flagged.len(),
        sink = reporter.sink_name(),
        "Reporting flagged messages"
    );

    let pb = ProgressBar::new(flagged.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Reporting [{bar:30}] {pos}/{len} ({eta})")
            .expect("valid template"),
    );

    let outcomes: Vec<bool> = stream::iter(flagged.into_iter().map(|(message, result)| {
        let pb = &pb;
        async move {
            let ok = reporter.report(message, result).await;
            pb.inc(1);
            ok
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;
    pb.finish_and_clear();

    summary.reported = outcomes.iter().filter(|ok| **ok).count();
    summary.report_failures = outcomes.len() - summary.reported;

    (results, summary)
}

/// Split file contents into messages: one per non-blank line, trimmed.
pub fn split_messages(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_messages_skips_blank_lines() {
        let contents = "first\n\n   \n  second  \r\nthird";
        assert_eq!(split_messages(contents), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_counts_without_reporting() {
        let analyzer = Analyzer::default();
        let reporter = Reporter::logging();
        let messages = vec![
            "Lunch at noon?".to_string(),
            "Urgent: verify your account".to_string(),
            "URGENT: your account has been suspended, click here http://bit.ly/x".to_string(),
        ];

        let (results, summary) = run(&analyzer, &reporter, &messages, false, 4).await;
        assert_eq!(results.len(), 3);
        assert_eq!(
            summary,
            BatchSummary {
                analyzed: 3,
                safe: 1,
                suspicious: 1,
                dangerous: 1,
                reported: 0,
                report_failures: 0,
            }
        );
    }
}
