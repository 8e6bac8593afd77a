//! Feature/contribution rendering — pure arithmetic turning a weight
//! vector and a candidate's feature vector into the per-feature rows shown
//! in the insights dialog.
//!
//! Contributions are computed exactly (`w[i] * f[i]`) and rounded only at
//! display time, never before arithmetic.

use crate::api::types::{RankedCandidate, FEATURE_COUNT};

/// Display labels, positionally aligned with the weight vector.
pub const FEATURE_LABELS: [&str; FEATURE_COUNT] = [
    "Semantic match",
    "Skill overlap",
    "Jaccard score",
    "Experience (norm)",
    "Education (norm)",
];

const EDUCATION_LABELS: [&str; 5] = ["No degree", "Diploma", "Bachelor", "Master", "PhD"];

/// One rendered row of the feature breakdown table.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub label: &'static str,
    pub weight: f64,
    pub value: f64,
    pub contribution: f64,
}

/// Per-feature contributions `w[i] * f[i]`. A weight vector shorter than
/// [`FEATURE_COUNT`] contributes 0 for the missing coefficients.
pub fn contributions(weights: &[f64], features: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
    let mut out = [0.0; FEATURE_COUNT];
    for (i, value) in features.iter().enumerate() {
        let weight = weights.get(i).copied().unwrap_or(0.0);
        out[i] = weight * value;
    }
    out
}

/// Assembles the labeled breakdown rows for one candidate.
pub fn feature_rows(candidate: &RankedCandidate, weights: &[f64]) -> Vec<FeatureRow> {
    let features = candidate.features();
    let contribs = contributions(weights, &features);
    FEATURE_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| FeatureRow {
            label,
            weight: weights.get(i).copied().unwrap_or(0.0),
            value: features[i],
            contribution: contribs[i],
        })
        .collect()
}

/// Rounds to 3 decimal places. Display-time only.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Human-readable education level; out-of-range levels get the placeholder.
pub fn education_label(level: i32) -> &'static str {
    usize::try_from(level)
        .ok()
        .and_then(|i| EDUCATION_LABELS.get(i).copied())
        .unwrap_or(crate::privacy::PLACEHOLDER)
}

/// Mean score across a shortlist, 0 when empty. Shown in the list header.
pub fn average_score(candidates: &[RankedCandidate]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    candidates.iter().map(|c| c.score).sum::<f64>() / candidates.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_candidate(features: [f64; FEATURE_COUNT], score: f64) -> RankedCandidate {
        RankedCandidate {
            candidate_id: 1,
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-111-2222".to_string(),
            skills: vec!["rust".to_string()],
            years_exp: 7.0,
            edu_level_raw: 3,
            sem_sim: features[0],
            skill_overlap: features[1],
            jaccard: features[2],
            years: features[3],
            edu: features[4],
            score,
            explore: false,
        }
    }

    #[test]
    fn test_contribution_is_exact_product() {
        let weights = [0.5, 0.18, 0.1, 0.17, 0.05];
        let features = [0.9, 0.6, 0.3, 0.7, 0.75];
        let contribs = contributions(&weights, &features);
        for i in 0..FEATURE_COUNT {
            assert_eq!(contribs[i], weights[i] * features[i]);
        }
    }

    #[test]
    fn test_missing_weights_treated_as_zero() {
        let weights = [0.5, 0.18];
        let features = [0.9, 0.6, 0.3, 0.7, 0.75];
        let contribs = contributions(&weights, &features);
        assert_eq!(contribs[0], 0.45);
        assert_eq!(contribs[2], 0.0);
        assert_eq!(contribs[4], 0.0);
    }

    #[test]
    fn test_rounding_only_at_display_time() {
        // 0.123456... must survive intact in the row and only flatten
        // through round3.
        let weights = [0.111, 0.0, 0.0, 0.0, 0.0];
        let features = [1.112, 0.0, 0.0, 0.0, 0.0];
        let contribs = contributions(&weights, &features);
        assert_eq!(contribs[0], 0.111 * 1.112);
        assert_eq!(round3(contribs[0]), 0.123);
    }

    #[test]
    fn test_feature_rows_align_labels_and_order() {
        let candidate = make_candidate([0.9, 0.6, 0.3, 0.7, 0.75], 0.65);
        let weights = [0.5, 0.18, 0.1, 0.17, 0.05];
        let rows = feature_rows(&candidate, &weights);
        assert_eq!(rows.len(), FEATURE_COUNT);
        assert_eq!(rows[0].label, "Semantic match");
        assert_eq!(rows[0].value, 0.9);
        assert_eq!(rows[4].label, "Education (norm)");
        assert_eq!(rows[4].contribution, 0.05 * 0.75);
    }

    #[test]
    fn test_education_labels() {
        assert_eq!(education_label(0), "No degree");
        assert_eq!(education_label(4), "PhD");
        assert_eq!(education_label(5), crate::privacy::PLACEHOLDER);
        assert_eq!(education_label(-1), crate::privacy::PLACEHOLDER);
    }

    #[test]
    fn test_average_score_empty_is_zero() {
        assert_eq!(average_score(&[]), 0.0);
    }

    #[test]
    fn test_average_score() {
        let a = make_candidate([0.0; FEATURE_COUNT], 0.6);
        let b = make_candidate([0.0; FEATURE_COUNT], 0.8);
        assert!((average_score(&[a, b]) - 0.7).abs() < 1e-12);
    }
}
