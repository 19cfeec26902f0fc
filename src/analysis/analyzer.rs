// Message analyzer — compiles a RuleSet once, then classifies messages.
//
// `analyze` is a total function over strings: no error states, no I/O, no
// shared mutable state. The only side effect is reading the clock for the
// result timestamp. An Analyzer is Send + Sync and can be shared freely.

use anyhow::{Context, Result};
use chrono::Utc;
use regex_lite::Regex;
use tracing::debug;

use super::models::{AnalysisDetails, AnalysisResult};
use super::rules::{Matcher, RuleSet};
use super::scoring::{compute_risk_score, recommendations_for};

/// A pattern rule with its matcher compiled.
struct CompiledPattern {
    category: String,
    matcher: CompiledMatcher,
    threat: String,
    tag: String,
}

enum CompiledMatcher {
    Regex(Regex),
    /// Needles are stored lower-cased and matched against the lower-cased message
    Substrings(Vec<String>),
}

impl CompiledMatcher {
    fn is_match(&self, message: &str, lowered: &str) -> bool {
        match self {
            CompiledMatcher::Regex(re) => re.is_match(message),
            CompiledMatcher::Substrings(needles) => {
                needles.iter().any(|n| lowered.contains(n.as_str()))
            }
        }
    }
}

pub struct Analyzer {
    rules: RuleSet,
    url_regex: Regex,
    keywords: Vec<String>,
    patterns: Vec<CompiledPattern>,
}

impl Default for Analyzer {
    /// Analyzer with the built-in rule table.
    fn default() -> Self {
        Self::new(RuleSet::default()).expect("built-in rule table compiles")
    }
}

impl Analyzer {
    /// Compile a rule table.
    ///
    /// Fails on invalid regular expressions or inverted thresholds. Empty
    /// keywords and needles are dropped since they would match every message.
    pub fn new(rules: RuleSet) -> Result<Self> {
        rules.thresholds.validate()?;
        if rules.keywords.max_listed == 0 {
            anyhow::bail!("keywords.max_listed must be at least 1");
        }

        let url_regex = Regex::new(&rules.urls.pattern)
            .with_context(|| format!("Invalid URL pattern: {}", rules.urls.pattern))?;

        let keywords = normalize_terms(&rules.keywords.terms);

        let patterns = rules
            .patterns
            .iter()
            .map(|rule| {
                let matcher = match &rule.matcher {
                    Matcher::Regex { pattern } => {
                        CompiledMatcher::Regex(Regex::new(pattern).with_context(|| {
                            format!("Invalid pattern for category {}: {pattern}", rule.category)
                        })?)
                    }
                    Matcher::Substrings { needles } => {
                        CompiledMatcher::Substrings(normalize_terms(needles))
                    }
                };
                Ok(CompiledPattern {
                    category: rule.category.clone(),
                    matcher,
                    threat: rule.threat.clone(),
                    tag: rule.tag.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            url_regex,
            keywords,
            patterns,
        })
    }

    /// The rule table this analyzer was compiled from.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Classify a message.
    pub fn analyze(&self, message: &str) -> AnalysisResult {
        let lowered = message.to_lowercase();
        let mut threats = Vec::new();
        let mut pattern_tags = Vec::new();

        // Pass 1: URL extraction. regex-lite only knows ASCII whitespace, so
        // the message is split on Unicode whitespace first (NBSP, U+3000).
        let urls: Vec<String> = message
            .split(char::is_whitespace)
            .flat_map(|word| self.url_regex.find_iter(word))
            .map(|m| m.as_str().to_string())
            .collect();
        if !urls.is_empty() {
            threats.push(self.rules.urls.threat.clone());
            pattern_tags.push(self.rules.urls.tag.clone());
        }

        // Pass 2: phishing vocabulary
        let matched_keywords: Vec<&str> = self
            .keywords
            .iter()
            .filter(|k| lowered.contains(k.as_str()))
            .map(String::as_str)
            .collect();
        if !matched_keywords.is_empty() {
            let listed: Vec<&str> = matched_keywords
                .iter()
                .take(self.rules.keywords.max_listed)
                .copied()
                .collect();
            threats.push(format!(
                "{}: {}",
                self.rules.keywords.threat_prefix,
                listed.join(", ")
            ));
        }

        // Pass 3+: presence patterns (card numbers, shorteners, ...)
        for pattern in &self.patterns {
            if pattern.matcher.is_match(message, &lowered) {
                debug!(category = %pattern.category, "Pattern matched");
                threats.push(pattern.threat.clone());
                pattern_tags.push(pattern.tag.clone());
            }
        }

        let risk_score = compute_risk_score(
            matched_keywords.len(),
            urls.len(),
            pattern_tags.len(),
            &self.rules.weights,
        );
        let status = self.rules.thresholds.classify(risk_score);

        debug!(
            keywords = matched_keywords.len(),
            urls = urls.len(),
            pattern_categories = pattern_tags.len(),
            risk_score,
            status = %status,
            "Analyzed message"
        );

        if threats.is_empty() {
            threats.push(self.rules.no_threats.clone());
        }

        AnalysisResult {
            status,
            threats,
            recommendations: recommendations_for(status),
            details: AnalysisDetails {
                urls: (!urls.is_empty()).then_some(urls),
                suspicious_patterns: (!pattern_tags.is_empty()).then_some(pattern_tags),
                risk_score,
            },
            timestamp: Utc::now(),
        }
    }
}

/// Lower-case, trim, and drop empty terms.
fn normalize_terms(terms: &[String]) -> Vec<String> {
    terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
