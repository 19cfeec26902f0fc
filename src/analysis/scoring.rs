// Risk score formula, status thresholds and recommendation policy.
//
// The score is additive: each keyword hit, each URL and each pattern
// category contributes a fixed weight, and the sum is capped at 100.
// Status is a pure function of the score and recommendations are a pure
// function of the status.

use serde::{Deserialize, Serialize};

use super::models::Status;

/// Upper bound of the risk score.
pub const MAX_RISK_SCORE: u8 = 100;

/// Per-signal weights for the risk score formula.
///
/// `score = min(100, keyword * keywords + url * urls + pattern_category * categories)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Points per matched phishing keyword (default 15)
    pub keyword: u32,
    /// Points per extracted URL (default 20)
    pub url: u32,
    /// Points per pattern category that fired (default 25)
    pub pattern_category: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            keyword: 15,
            url: 20,
            pattern_category: 25,
        }
    }
}

/// Lower bounds (inclusive) of the suspicious and dangerous tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusThresholds {
    /// Scores at or above this are at least suspicious (default 30)
    pub suspicious: u8,
    /// Scores at or above this are dangerous (default 70)
    pub dangerous: u8,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            suspicious: 30,
            dangerous: 70,
        }
    }
}

impl StatusThresholds {
    /// Map a score onto a status tier. Boundaries belong to the higher tier.
    pub fn classify(&self, score: u8) -> Status {
        match score {
            s if s >= self.dangerous => Status::Dangerous,
            s if s >= self.suspicious => Status::Suspicious,
            _ => Status::Safe,
        }
    }

    /// Thresholds must be ordered and within the score range.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.suspicious > self.dangerous {
            anyhow::bail!(
                "Suspicious threshold ({}) must not exceed dangerous threshold ({})",
                self.suspicious,
                self.dangerous
            );
        }
        if self.dangerous > MAX_RISK_SCORE {
            anyhow::bail!(
                "Dangerous threshold ({}) is above the maximum score {MAX_RISK_SCORE}",
                self.dangerous
            );
        }
        Ok(())
    }
}

/// Compute the risk score from detector counts.
///
/// Saturating arithmetic keeps absurdly long messages from overflowing
/// before the cap is applied.
pub fn compute_risk_score(
    keyword_matches: usize,
    url_count: usize,
    pattern_categories: usize,
    weights: &ScoreWeights,
) -> u8 {
    let weighted = |count: usize, weight: u32| (count as u64).saturating_mul(u64::from(weight));

    let total = weighted(keyword_matches, weights.keyword)
        .saturating_add(weighted(url_count, weights.url))
        .saturating_add(weighted(pattern_categories, weights.pattern_category));

    total.min(u64::from(MAX_RISK_SCORE)) as u8
}

const SAFE_RECOMMENDATIONS: &[&str] = &["The message appears to be safe"];

const SUSPICIOUS_RECOMMENDATIONS: &[&str] = &[
    "Verify the sender's identity",
    "Do not share personal information",
    "Contact the organization directly through a channel you already know",
];

const DANGEROUS_RECOMMENDATIONS: &[&str] = &[
    "Do NOT reply to this message",
    "Do NOT click any links",
    "Block and report the sender",
    "If you already shared any data, change your passwords immediately",
];

/// User-facing guidance for a status tier. Fixed text, no randomness.
pub fn recommendations_for(status: Status) -> Vec<String> {
    let texts = match status {
        Status::Safe => SAFE_RECOMMENDATIONS,
        Status::Suspicious => SUSPICIOUS_RECOMMENDATIONS,
        Status::Dangerous => DANGEROUS_RECOMMENDATIONS,
    };
    texts.iter().map(|t| t.to_string()).collect()
}
