use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::analysis::RuleSet;

/// Default backend base URL (the SafeChat core API).
pub const DEFAULT_API_URL: &str = "http://localhost:8084/v1";

/// Default transport timeout for report submission.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Where `--report` sends reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Log only (default) — nothing leaves the machine
    Log,
    /// Local SQLite report store
    Store,
    /// Remote SafeChat backend — requires SAFECHAT_API_URL to be reachable
    Http,
}

impl SinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SinkKind::Log => "log",
            SinkKind::Store => "store",
            SinkKind::Http => "http",
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. The
/// analyzer itself reads nothing from the environment; only the CLI does.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    /// Optional JSON rule table replacing the built-in one
    pub rules_path: Option<PathBuf>,
    pub sink: SinkKind,
    pub api_url: String,
    /// Bearer token for the backend (SAFECHAT_API_TOKEN)
    pub api_token: Option<String>,
    pub api_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup (the environment in
    /// production, a map in tests).
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sink = match var("SAFECHAT_SINK").as_deref().map(str::trim) {
            Some("store") => SinkKind::Store,
            Some("http") => SinkKind::Http,
            None | Some("") | Some("log") => SinkKind::Log,
            Some(other) => anyhow::bail!(
                "Unknown SAFECHAT_SINK value: {other}\n\
                 Expected one of: log, store, http"
            ),
        };

        let api_timeout = match var("SAFECHAT_API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    anyhow::anyhow!("SAFECHAT_API_TIMEOUT_SECS must be a whole number, got {raw}")
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
        };

        Ok(Self {
            db_path: var("SAFECHAT_DB_PATH").unwrap_or_else(|| "./safechat.db".to_string()),
            rules_path: var("SAFECHAT_RULES")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            sink,
            api_url: var("SAFECHAT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_token: var("SAFECHAT_API_TOKEN").filter(|t| !t.is_empty()),
            api_timeout,
        })
    }

    /// Check that the backend URL is usable.
    /// Call this before building the HTTP sink.
    pub fn require_api_url(&self) -> Result<()> {
        let url = self.api_url.trim();
        if url.is_empty() {
            anyhow::bail!(
                "SAFECHAT_API_URL is empty. Set it in your .env file \
                 or choose another sink with SAFECHAT_SINK=log|store."
            );
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("SAFECHAT_API_URL must start with http:// or https://, got {url}");
        }
        Ok(())
    }

    /// The active rule table: SAFECHAT_RULES if set, otherwise built-in.
    pub fn load_rules(&self) -> Result<RuleSet> {
        RuleSet::load_or_default(self.rules_path.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.db_path, "./safechat.db");
        assert_eq!(config.sink, SinkKind::Log);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.api_timeout, Duration::from_secs(30));
        assert!(config.rules_path.is_none());
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SAFECHAT_SINK", "http"),
            ("SAFECHAT_API_URL", "https://api.example.org/v1"),
            ("SAFECHAT_API_TOKEN", "abc"),
            ("SAFECHAT_API_TIMEOUT_SECS", "5"),
            ("SAFECHAT_RULES", "/etc/safechat/rules.json"),
        ])
        .unwrap();
        assert_eq!(config.sink, SinkKind::Http);
        assert_eq!(config.api_token.as_deref(), Some("abc"));
        assert_eq!(config.api_timeout, Duration::from_secs(5));
        assert_eq!(
            config.rules_path,
            Some(PathBuf::from("/etc/safechat/rules.json"))
        );
        assert!(config.require_api_url().is_ok());
    }

    #[test]
    fn test_unknown_sink_rejected() {
        let err = config_from(&[("SAFECHAT_SINK", "carrier-pigeon")]).unwrap_err();
        assert!(err.to_string().contains("carrier-pigeon"));
    }

    #[test]
    fn test_bad_timeout_rejected() {
        assert!(config_from(&[("SAFECHAT_API_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn test_api_url_scheme_required() {
        let config = config_from(&[("SAFECHAT_API_URL", "localhost:8084")]).unwrap();
        assert!(config.require_api_url().is_err());
    }

    #[test]
    fn test_builtin_rules_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.load_rules().unwrap(), RuleSet::default());
    }
}
