// Message risk analysis — the pure core.
//
// The Analyzer compiles a RuleSet (detectors, vocabulary, weights,
// thresholds) and turns message text into an AnalysisResult. Nothing in
// here performs I/O; reporting lives in `crate::report`.

pub mod analyzer;
pub mod models;
pub mod rules;
pub mod scoring;

use std::sync::LazyLock;

pub use analyzer::Analyzer;
pub use models::{AnalysisDetails, AnalysisResult, Status};
pub use rules::RuleSet;

static DEFAULT_ANALYZER: LazyLock<Analyzer> = LazyLock::new(Analyzer::default);

/// Analyze a message with the built-in rule table.
pub fn analyze(message: &str) -> AnalysisResult {
    DEFAULT_ANALYZER.analyze(message)
}
