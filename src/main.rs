use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use safechat::analysis::Analyzer;
use safechat::config::{Config, SinkKind};
use safechat::db::Database;
use safechat::output::terminal;
use safechat::report::traits::ReportSink;
use safechat::report::Reporter;

/// SafeChat: phishing and social-engineering risk analysis for messages.
///
/// Classifies a message as safe, suspicious or dangerous, explains why,
/// and optionally reports risky messages to a local store or the backend.
#[derive(Parser)]
#[command(name = "safechat", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the local report store
    Init,

    /// Analyze a single message
    Analyze {
        /// Message text (omit and pass --stdin to read from standard input)
        text: Option<String>,

        /// Read the message from standard input
        #[arg(long)]
        stdin: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Report the message if it is suspicious or dangerous
        #[arg(long)]
        report: bool,
    },

    /// Analyze a file with one message per line
    Batch {
        /// Path to the message file
        file: PathBuf,

        /// Report every suspicious or dangerous message
        #[arg(long)]
        report: bool,

        /// Number of reports to submit in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List stored reports
    Reports {
        /// Number of most recent reports to show (default: 20)
        #[arg(long, default_value = "20")]
        limit: u32,
    },

    /// Show one stored report in full
    Show {
        /// Report ID (see `safechat reports`)
        id: i64,
    },

    /// Print the active detection rules
    Rules {
        /// Print as JSON (usable as a SAFECHAT_RULES file)
        #[arg(long)]
        json: bool,
    },

    /// Show system status (report store, sink, rules)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so `--json` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("safechat=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing SafeChat report store...");
            let config = Config::load()?;
            let db = init_database(&config)?;
            let table_count = db.table_count().await?;
            println!("Report store initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nTry: safechat analyze \"URGENT: verify your account at http://bit.ly/x\"");
        }

        Commands::Analyze {
            text,
            stdin,
            json,
            report,
        } => {
            let config = Config::load()?;
            let analyzer = build_analyzer(&config)?;

            let message = if stdin {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read message from stdin")?;
                buf
            } else {
                text.context("Provide the message text, or pass --stdin")?
            };

            let result = analyzer.analyze(&message);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                terminal::display_analysis(&result);
            }

            if report {
                if result.status.is_flagged() {
                    let reporter = create_reporter(&config)?;
                    if reporter.report(&message, &result).await {
                        eprintln!("\n{}", format!("Reported via {}.", reporter.sink_name()).bold());
                    } else {
                        eprintln!(
                            "\n{} the report could not be delivered. Try again later.",
                            "Warning:".yellow()
                        );
                    }
                } else {
                    eprintln!("\nMessage looks safe; nothing reported.");
                }
            }
        }

        Commands::Batch {
            file,
            report,
            concurrency,
            json,
        } => {
            let config = Config::load()?;
            let analyzer = build_analyzer(&config)?;

            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let messages = safechat::pipeline::batch::split_messages(&contents);

            if messages.is_empty() {
                println!("No messages found in {}", file.display());
                return Ok(());
            }

            let reporter = if report {
                create_reporter(&config)?
            } else {
                Reporter::logging()
            };

            let (results, summary) = safechat::pipeline::batch::run(
                &analyzer,
                &reporter,
                &messages,
                report,
                concurrency,
            )
            .await;

            if json {
                let rows: Vec<serde_json::Value> = messages
                    .iter()
                    .zip(&results)
                    .map(|(message, analysis)| {
                        serde_json::json!({ "message": message, "analysis": analysis })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                terminal::display_batch_results(&messages, &results);
                terminal::display_batch_summary(&summary);
            }
        }

        Commands::Reports { limit } => {
            let config = Config::load()?;
            let db = open_database(&config)?;
            let reports = db.get_recent_reports(limit).await?;
            terminal::display_report_list(&reports);
        }

        Commands::Show { id } => {
            let config = Config::load()?;
            let db = open_database(&config)?;
            let report = db
                .get_report(id)
                .await?
                .with_context(|| format!("No report with ID {id}"))?;
            terminal::display_report_detail(&report);
        }

        Commands::Rules { json } => {
            let config = Config::load()?;
            let analyzer = build_analyzer(&config)?;
            if json {
                println!("{}", analyzer.rules().to_json_pretty()?);
            } else {
                terminal::display_rules(analyzer.rules());
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            let rules = config.load_rules()?;
            let db = if safechat::status::database_exists(&config.db_path) {
                Some(open_database(&config)?)
            } else {
                None
            };
            safechat::status::show(&config, &rules, db.as_ref()).await?;
        }
    }

    Ok(())
}

/// Compile the active rule table.
fn build_analyzer(config: &Config) -> Result<Analyzer> {
    let rules = config.load_rules()?;
    Analyzer::new(rules).context("Invalid detection rules")
}

/// Build the reporter for the configured sink.
fn create_reporter(config: &Config) -> Result<Reporter> {
    let sink: Box<dyn ReportSink> = match config.sink {
        SinkKind::Log => Box::new(safechat::report::log::LogSink),
        SinkKind::Store => Box::new(safechat::report::store::StoreSink::new(init_database(
            config,
        )?)),
        SinkKind::Http => {
            config.require_api_url()?;
            Box::new(safechat::report::http::HttpSink::new(
                &config.api_url,
                config.api_token.clone(),
                config.api_timeout,
            )?)
        }
    };
    Ok(Reporter::new(sink))
}

fn open_database(config: &Config) -> Result<Arc<dyn Database>> {
    #[cfg(feature = "sqlite")]
    let db = safechat::db::open_sqlite(&config.db_path);
    #[cfg(not(feature = "sqlite"))]
    let db = Err(anyhow::anyhow!(
        "The report store needs the 'sqlite' feature (cannot open {}).\n\
         Rebuild with: cargo build --features sqlite",
        config.db_path
    ));
    db
}

fn init_database(config: &Config) -> Result<Arc<dyn Database>> {
    #[cfg(feature = "sqlite")]
    let db = safechat::db::initialize_sqlite(&config.db_path);
    #[cfg(not(feature = "sqlite"))]
    let db = Err(anyhow::anyhow!(
        "The report store needs the 'sqlite' feature (cannot create {}).\n\
         Rebuild with: cargo build --features sqlite",
        config.db_path
    ));
    db
}
