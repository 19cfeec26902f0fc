// Colored terminal output for analyses, stored reports and batch runs.
//
// main.rs delegates all formatting here so the commands stay short.

use colored::Colorize;

use crate::analysis::{AnalysisResult, RuleSet, Status};
use crate::analysis::rules::Matcher;
use crate::db::models::{ReportRecord, StatusCount};
use crate::pipeline::batch::BatchSummary;

/// Display a single analysis result.
pub fn display_analysis(result: &AnalysisResult) {
    println!(
        "\n{}  {}",
        colorize_status(result.status, &format!(" {} ", status_banner(result.status))),
        format!("risk score {}/100", result.risk_score()).bold()
    );

    println!("\n  {}", "Threats:".bold());
    for threat in &result.threats {
        println!("    - {threat}");
    }

    if let Some(urls) = &result.details.urls {
        println!("\n  {}", "URLs:".bold());
        for url in urls {
            println!("    {}", url.underline());
        }
    }

    if let Some(patterns) = &result.details.suspicious_patterns {
        println!("\n  {} {}", "Patterns:".bold(), patterns.join(", ").dimmed());
    }

    println!("\n  {}", "Recommendations:".bold());
    for (i, rec) in result.recommendations.iter().enumerate() {
        println!("    {}. {rec}", i + 1);
    }

    println!(
        "\n  {}",
        format!("Analyzed at {}", result.timestamp.to_rfc3339()).dimmed()
    );
}

/// Display a list of stored reports, newest first.
pub fn display_report_list(reports: &[ReportRecord]) {
    if reports.is_empty() {
        println!("No reports stored yet. Run `safechat analyze --report` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Reported Messages ({}) ===", reports.len()).bold()
    );
    println!();
    println!(
        "  {:>5}  {:<11} {:>5}  {:<19}  {}",
        "ID".dimmed(),
        "Status".dimmed(),
        "Score".dimmed(),
        "Reported".dimmed(),
        "Message".dimmed(),
    );
    println!("  {}", "-".repeat(90).dimmed());

    for report in reports {
        let preview = super::truncate_chars(&super::single_line(&report.message), 48);
        println!(
            "  {:>5}  {:<11} {:>5}  {:<19}  {}",
            report.id,
            colorize_status_str(&report.status),
            report.risk_score,
            report.reported_at,
            preview.dimmed(),
        );
    }
    println!();
}

/// Display one stored report in full.
pub fn display_report_detail(report: &ReportRecord) {
    println!(
        "\n{}",
        format!("=== Report #{} ({}) ===", report.id, report.reported_at).bold()
    );
    println!("\n  {}", "Message:".bold());
    for line in report.message.lines() {
        println!("    {}", line.dimmed());
    }
    display_analysis(&report.analysis);
}

/// Display the per-status breakdown of stored reports.
pub fn display_status_counts(counts: &[StatusCount]) {
    if counts.is_empty() {
        println!("Reports: none stored yet");
        return;
    }
    let total: i64 = counts.iter().map(|c| c.count).sum();
    println!("Reports: {total} total");
    for c in counts {
        println!("  {:<11} {}", colorize_status_str(&c.status), c.count);
    }
}

/// Display one line per analyzed message.
pub fn display_batch_results(messages: &[String], results: &[AnalysisResult]) {
    println!();
    for (i, (message, result)) in messages.iter().zip(results).enumerate() {
        let preview = super::truncate_chars(message, 60);
        println!(
            "  {:>4}. {:<11} {:>3}  {}",
            i + 1,
            colorize_status_str(result.status.as_str()),
            result.risk_score(),
            preview.dimmed()
        );
    }
}

/// Display the outcome of a batch run.
pub fn display_batch_summary(summary: &BatchSummary) {
    println!("\n{}", "Batch complete.".bold());
    println!("  Messages analyzed: {}", summary.analyzed);
    println!(
        "  {} safe, {} suspicious, {} dangerous",
        summary.safe.to_string().green(),
        summary.suspicious.to_string().yellow(),
        summary.dangerous.to_string().red().bold()
    );
    if summary.reported > 0 || summary.report_failures > 0 {
        println!("  Reports submitted: {}", summary.reported);
    }
    if summary.report_failures > 0 {
        println!(
            "  {} {} reports failed (retry later)",
            "Warning:".yellow(),
            summary.report_failures
        );
    }
}

/// Display the active rule table in human-readable form.
pub fn display_rules(rules: &RuleSet) {
    println!("\n{}", "=== Detection Rules ===".bold());

    println!(
        "\n  {} (+{} per URL, +{} category)",
        "urls".bold(),
        rules.weights.url,
        rules.weights.pattern_category
    );
    println!("    pattern: {}", rules.urls.pattern.dimmed());

    println!(
        "\n  {} (+{} per match, first {} listed)",
        "keywords".bold(),
        rules.weights.keyword,
        rules.keywords.max_listed
    );
    println!("    {}", rules.keywords.terms.join(", ").dimmed());

    for rule in &rules.patterns {
        println!(
            "\n  {} (+{} category)",
            rule.category.bold(),
            rules.weights.pattern_category
        );
        match &rule.matcher {
            Matcher::Regex { pattern } => println!("    pattern: {}", pattern.dimmed()),
            Matcher::Substrings { needles } => {
                println!("    contains: {}", needles.join(", ").dimmed())
            }
        }
    }

    println!(
        "\n  Thresholds: {} < {} <= {} < {} <= {}",
        "safe".green(),
        rules.thresholds.suspicious,
        "suspicious".yellow(),
        rules.thresholds.dangerous,
        "dangerous".red().bold()
    );
}

fn status_banner(status: Status) -> &'static str {
    match status {
        Status::Safe => "SAFE",
        Status::Suspicious => "SUSPICIOUS",
        Status::Dangerous => "DANGEROUS",
    }
}

/// Colorize text according to a status.
fn colorize_status(status: Status, text: &str) -> colored::ColoredString {
    match status {
        Status::Safe => text.black().on_green(),
        Status::Suspicious => text.black().on_yellow(),
        Status::Dangerous => text.white().on_red().bold(),
    }
}

/// Colorize a stored status string.
fn colorize_status_str(status: &str) -> colored::ColoredString {
    match status {
        "dangerous" => status.red().bold(),
        "suspicious" => status.yellow(),
        "safe" => status.green(),
        _ => status.dimmed(),
    }
}
