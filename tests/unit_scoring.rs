// Unit tests for scoring and recommendation policy.
//
// Tests isolated pure functions: Status::from_score boundary conditions,
// compute_risk_score weights and clamping, and recommendation text sets.

use safechat::analysis::models::Status;
use safechat::analysis::scoring::{
    compute_risk_score, recommendations_for, ScoreWeights, StatusThresholds, MAX_RISK_SCORE,
};

// ============================================================
// Status::from_score — boundary conditions
// ============================================================

#[test]
fn status_zero_is_safe() {
    assert_eq!(Status::from_score(0), Status::Safe);
}

#[test]
fn status_just_below_suspicious() {
    assert_eq!(Status::from_score(29), Status::Safe);
}

#[test]
fn status_exact_boundary_suspicious() {
    assert_eq!(Status::from_score(30), Status::Suspicious);
}

#[test]
fn status_just_below_dangerous() {
    assert_eq!(Status::from_score(69), Status::Suspicious);
}

#[test]
fn status_exact_boundary_dangerous() {
    assert_eq!(Status::from_score(70), Status::Dangerous);
}

#[test]
fn status_max_score_is_dangerous() {
    assert_eq!(Status::from_score(100), Status::Dangerous);
}

#[test]
fn status_every_score_matches_table() {
    for score in 0..=MAX_RISK_SCORE {
        let expected = if score < 30 {
            Status::Safe
        } else if score < 70 {
            Status::Suspicious
        } else {
            Status::Dangerous
        };
        assert_eq!(Status::from_score(score), expected, "score {score}");
    }
}

#[test]
fn status_as_str_and_display_agree() {
    for status in [Status::Safe, Status::Suspicious, Status::Dangerous] {
        assert_eq!(status.to_string(), status.as_str());
    }
    assert_eq!(Status::Suspicious.as_str(), "suspicious");
}

#[test]
fn status_serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&Status::Dangerous).unwrap(),
        "\"dangerous\""
    );
}

#[test]
fn default_thresholds_are_30_and_70() {
    let t = StatusThresholds::default();
    assert_eq!((t.suspicious, t.dangerous), (30, 70));
}

// ============================================================
// compute_risk_score — weights and clamping
// ============================================================

#[test]
fn default_weights_are_15_20_25() {
    let w = ScoreWeights::default();
    assert_eq!((w.keyword, w.url, w.pattern_category), (15, 20, 25));
}

#[test]
fn single_keyword_scores_15() {
    assert_eq!(compute_risk_score(1, 0, 0, &ScoreWeights::default()), 15);
}

#[test]
fn single_url_with_its_category_scores_45() {
    // One URL contributes 20 plus the URL pattern category (25)
    assert_eq!(compute_risk_score(0, 1, 1, &ScoreWeights::default()), 45);
}

#[test]
fn single_pattern_category_scores_25() {
    assert_eq!(compute_risk_score(0, 0, 1, &ScoreWeights::default()), 25);
}

#[test]
fn two_keywords_reach_suspicious_exactly() {
    let score = compute_risk_score(2, 0, 0, &ScoreWeights::default());
    assert_eq!(score, 30);
    assert_eq!(Status::from_score(score), Status::Suspicious);
}

#[test]
fn score_clamped_at_100() {
    let w = ScoreWeights::default();
    assert_eq!(compute_risk_score(3, 1, 2, &w), 100); // 45 + 20 + 50 = 115
    assert_eq!(compute_risk_score(1000, 1000, 3, &w), 100);
}

#[test]
fn custom_weights_apply() {
    let w = ScoreWeights {
        keyword: 1,
        url: 2,
        pattern_category: 3,
    };
    assert_eq!(compute_risk_score(4, 3, 2, &w), 16);
}

#[test]
fn zero_weights_never_score() {
    let w = ScoreWeights {
        keyword: 0,
        url: 0,
        pattern_category: 0,
    };
    assert_eq!(compute_risk_score(50, 50, 3, &w), 0);
}

#[test]
fn score_monotonic_in_each_signal() {
    let w = ScoreWeights::default();
    for k in 0..8 {
        for u in 0..4 {
            for p in 0..3 {
                let base = compute_risk_score(k, u, p, &w);
                assert!(compute_risk_score(k + 1, u, p, &w) >= base);
                assert!(compute_risk_score(k, u + 1, p, &w) >= base);
                assert!(compute_risk_score(k, u, p + 1, &w) >= base);
            }
        }
    }
}

// ============================================================
// recommendations_for — fixed text sets
// ============================================================

#[test]
fn safe_has_single_reassurance() {
    let recs = recommendations_for(Status::Safe);
    assert_eq!(recs, vec!["The message appears to be safe"]);
}

#[test]
fn suspicious_has_three_items() {
    let recs = recommendations_for(Status::Suspicious);
    assert_eq!(recs.len(), 3);
    assert!(recs[0].contains("identity"));
    assert!(recs[1].contains("personal information"));
    assert!(recs[2].contains("Contact the organization"));
}

#[test]
fn dangerous_has_four_items() {
    let recs = recommendations_for(Status::Dangerous);
    assert_eq!(recs.len(), 4);
    assert!(recs[0].contains("reply"));
    assert!(recs[1].contains("links"));
    assert!(recs[2].contains("Block and report"));
    assert!(recs[3].contains("passwords"));
}

#[test]
fn recommendations_are_deterministic() {
    for status in [Status::Safe, Status::Suspicious, Status::Dangerous] {
        assert_eq!(recommendations_for(status), recommendations_for(status));
    }
}
