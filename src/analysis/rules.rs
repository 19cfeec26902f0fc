// Rule table — the detectors, vocabulary and policy weights in one place.
//
// The analyzer never hardcodes a literal; it compiles a RuleSet. The
// built-in table is `RuleSet::default()`. A replacement table can be
// loaded from JSON (SAFECHAT_RULES), which is also how `safechat rules
// --json` prints the active one.
//
// Detector order matters only for the order of narrative threats:
// URLs first, then keywords, then each pattern rule in table order.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::scoring::{ScoreWeights, StatusThresholds};

/// The complete, serializable detection policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub weights: ScoreWeights,
    #[serde(default)]
    pub thresholds: StatusThresholds,
    pub urls: UrlRule,
    pub keywords: KeywordRule,
    /// Pattern detectors besides URL extraction. Each one that fires counts
    /// as one pattern category.
    pub patterns: Vec<PatternRule>,
    /// Threat reported when no detector produced a finding
    pub no_threats: String,
}

/// URL extraction: every match is kept verbatim and counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRule {
    pub pattern: String,
    pub threat: String,
    pub tag: String,
}

/// Phishing vocabulary matched as substrings of the lower-cased message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub terms: Vec<String>,
    /// How many matched terms the narrative threat lists
    pub max_listed: usize,
    /// Prefix of the narrative threat, followed by ": " and the terms
    pub threat_prefix: String,
}

/// A presence detector that contributes a threat and a pattern tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Stable identifier, used by tests and `safechat rules`
    pub category: String,
    pub matcher: Matcher,
    pub threat: String,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Matcher {
    /// Regular expression run against the original message
    Regex { pattern: String },
    /// Case-insensitive substring match against any needle
    Substrings { needles: Vec<String> },
}

pub const URL_CATEGORY: &str = "urls";
pub const KEYWORD_CATEGORY: &str = "keywords";
pub const CARD_NUMBER_CATEGORY: &str = "card_number";
pub const URL_SHORTENER_CATEGORY: &str = "url_shortener";

const DEFAULT_KEYWORDS: &[&str] = &[
    "urgent",
    "account blocked",
    "verify",
    "prize",
    "you won",
    "click here",
    "confirm your identity",
    "suspended",
    "expired",
    "congratulations",
    "claim",
    "card",
    "bank",
    "password",
];

const DEFAULT_SHORTENERS: &[&str] = &["bit.ly", "tinyurl", "shorturl"];

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            thresholds: StatusThresholds::default(),
            urls: UrlRule {
                pattern: r"(?i)[a-z][a-z0-9+.-]*://\S+".to_string(),
                threat: "Suspicious links detected".to_string(),
                tag: "URLs in message".to_string(),
            },
            keywords: KeywordRule {
                terms: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
                max_listed: 3,
                threat_prefix: "Suspicious keywords".to_string(),
            },
            patterns: vec![
                PatternRule {
                    category: CARD_NUMBER_CATEGORY.to_string(),
                    matcher: Matcher::Regex {
                        pattern: r"\d{4}[ -]?\d{4}[ -]?\d{4}[ -]?\d{4}".to_string(),
                    },
                    threat: "Request for banking information".to_string(),
                    tag: "Credit-card-like pattern".to_string(),
                },
                PatternRule {
                    category: URL_SHORTENER_CATEGORY.to_string(),
                    matcher: Matcher::Substrings {
                        needles: DEFAULT_SHORTENERS.iter().map(|s| s.to_string()).collect(),
                    },
                    threat: "Shortened URL detected (high risk)".to_string(),
                    tag: "Link-shortening service".to_string(),
                },
            ],
            no_threats: "No obvious threats detected".to_string(),
        }
    }
}

impl RuleSet {
    /// Load a rule table from a JSON file.
    ///
    /// Omitted `weights` / `thresholds` fall back to the defaults. Patterns
    /// are not compiled here; `Analyzer::new` does that and reports errors.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse rule file {}", path.display()))
    }

    /// Load from `path` when given, otherwise use the built-in table.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize rule table")
    }

    /// Detector categories in evaluation order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![URL_CATEGORY, KEYWORD_CATEGORY];
        categories.extend(self.patterns.iter().map(|p| p.category.as_str()));
        categories
    }
}
