// Analysis models — the result of classifying a single message.
//
// These types are what the analyzer hands back and what report sinks and
// the report store persist. They serialize to the JSON shape the mobile
// client consumes: camelCase details, lowercase status, ISO-8601 timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scoring::StatusThresholds;

/// Coarse classification of a message, derived from its risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Safe,
    Suspicious,
    Dangerous,
}

impl Status {
    /// Determine the status from a risk score (0-100) using the default
    /// 30/70 thresholds.
    pub fn from_score(score: u8) -> Self {
        StatusThresholds::default().classify(score)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Safe => "safe",
            Status::Suspicious => "suspicious",
            Status::Dangerous => "dangerous",
        }
    }

    /// Whether a report of this message should be labelled as phishing.
    pub fn is_flagged(&self) -> bool {
        !matches!(self, Status::Safe)
    }

    /// Binary label stored alongside reports: 1 = phishing, 0 = benign.
    pub fn label(&self) -> u8 {
        u8::from(self.is_flagged())
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "safe" => Ok(Status::Safe),
            "suspicious" => Ok(Status::Suspicious),
            "dangerous" => Ok(Status::Dangerous),
            other => anyhow::bail!("Unknown status: {other}"),
        }
    }
}

/// Supporting evidence for a classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDetails {
    /// Every URL found in the message, verbatim and in order of appearance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
    /// Pattern-category labels (URLs, card numbers, shorteners)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suspicious_patterns: Option<Vec<String>>,
    pub risk_score: u8,
}

/// The full verdict for one message.
///
/// Built fresh by every `analyze` call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: Status,
    /// Narrative findings. Never empty: falls back to a single
    /// "no obvious threats" entry.
    pub threats: Vec<String>,
    pub recommendations: Vec<String>,
    pub details: AnalysisDetails,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn risk_score(&self) -> u8 {
        self.details.risk_score
    }

    /// Compare two results ignoring the capture timestamp.
    pub fn same_verdict(&self, other: &AnalysisResult) -> bool {
        self.status == other.status
            && self.threats == other.threats
            && self.recommendations == other.recommendations
            && self.details == other.details
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            status: Status::Suspicious,
            threats: vec!["Request for banking information".to_string()],
            recommendations: vec!["Verify the sender's identity".to_string()],
            details: AnalysisDetails {
                urls: None,
                suspicious_patterns: Some(vec!["Credit-card-like pattern".to_string()]),
                risk_score: 40,
            },
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_json_shape_matches_client_contract() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["status"], "suspicious");
        assert_eq!(json["details"]["riskScore"], 40);
        assert_eq!(
            json["details"]["suspiciousPatterns"][0],
            "Credit-card-like pattern"
        );
        // None fields are omitted, not serialized as null
        assert!(json["details"].get("urls").is_none());
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_json_roundtrip_preserves_verdict() {
        let original = sample();
        let json = serde_json::to_string(&original).unwrap();
        let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert!(parsed.same_verdict(&original));
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("Dangerous".parse::<Status>().unwrap(), Status::Dangerous);
        assert_eq!("safe".parse::<Status>().unwrap(), Status::Safe);
        assert!("unknown".parse::<Status>().is_err());
    }

    #[test]
    fn test_label_flags_non_safe() {
        assert_eq!(Status::Safe.label(), 0);
        assert_eq!(Status::Suspicious.label(), 1);
        assert_eq!(Status::Dangerous.label(), 1);
    }
}
