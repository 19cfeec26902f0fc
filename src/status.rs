// System status display — report store stats, sink and rule configuration.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::analysis::RuleSet;
use crate::config::{Config, SinkKind};
use crate::db::Database;

/// Display system status to the terminal.
///
/// `db` is `None` when the database has not been created yet.
pub async fn show(config: &Config, rules: &RuleSet, db: Option<&Arc<dyn Database>>) -> Result<()> {
    // Rule table
    match &config.rules_path {
        Some(path) => println!("Rules: {} (custom)", path.display()),
        None => println!("Rules: built-in"),
    }
    println!(
        "  {} keywords, {} detectors, thresholds {}/{}",
        rules.keywords.terms.len(),
        rules.categories().len(),
        rules.thresholds.suspicious,
        rules.thresholds.dangerous
    );

    // Report sink
    match config.sink {
        SinkKind::Http => println!(
            "Report sink: http ({}, timeout {}s)",
            config.api_url,
            config.api_timeout.as_secs()
        ),
        other => println!("Report sink: {}", other.as_str()),
    }

    // Report store
    let Some(db) = db else {
        println!("Database: not initialized");
        println!("\nRun `safechat init` to set up the report store.");
        return Ok(());
    };

    let file_size = std::fs::metadata(&config.db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", config.db_path, file_size);

    let counts = db.count_by_status().await?;
    crate::output::terminal::display_status_counts(&counts);

    if let Some(latest) = db.get_recent_reports(1).await?.first() {
        println!("Last report: #{} at {}", latest.id, latest.reported_at);
    }

    Ok(())
}

/// Whether the database file exists yet.
pub fn database_exists(db_path: &str) -> bool {
    Path::new(db_path).exists()
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
