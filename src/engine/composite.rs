//! Weighted blend of the available sub-scores.
//!
//! Missing dimensions are never treated as zero: their weight is redistributed
//! across the dimensions that do have data, and `completeness` reports how much
//! of the achievable picture was populated.

use crate::engine::normalize::{clamp_score, round_to};
use crate::types::scoring::{CompositeResult, Dimension, SubScores, WeightProfile};

pub const DEFAULT_MAX_DIMENSIONS: usize = 4;

/// Renormalized weights of the present dimensions. They always sum to 1
/// when at least one dimension is present. If every present dimension has
/// zero weight in the profile, the present dimensions share weight equally.
pub fn effective_weights(scores: &SubScores, profile: &WeightProfile) -> Vec<(Dimension, f64)> {
    let present = scores
        .present()
        .map(|(dimension, _)| (dimension, sanitize_weight(profile.weight(dimension))))
        .collect::<Vec<_>>();
    if present.is_empty() {
        return present;
    }

    let total: f64 = present.iter().map(|(_, weight)| weight).sum();
    if total <= f64::EPSILON {
        let equal = 1.0 / present.len() as f64;
        return present
            .into_iter()
            .map(|(dimension, _)| (dimension, equal))
            .collect();
    }
    present
        .into_iter()
        .map(|(dimension, weight)| (dimension, weight / total))
        .collect()
}

pub fn completeness(present: usize, max_dimensions: usize) -> f64 {
    let denominator = max_dimensions.clamp(1, DEFAULT_MAX_DIMENSIONS);
    (present as f64 / denominator as f64).min(1.0)
}

pub fn aggregate(
    scores: &SubScores,
    profile: &WeightProfile,
    max_dimensions: usize,
) -> CompositeResult {
    let weights = effective_weights(scores, profile);
    if weights.is_empty() {
        return CompositeResult::EMPTY;
    }

    let composite = weights
        .iter()
        .filter_map(|(dimension, weight)| {
            scores
                .get(*dimension)
                .map(|score| clamp_score(score) * weight)
        })
        .sum::<f64>();

    CompositeResult {
        composite: round_to(clamp_score(composite), 2),
        completeness: completeness(weights.len(), max_dimensions),
    }
}

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(value: f64) -> SubScores {
        SubScores {
            code_hosting: Some(value),
            community: Some(value),
            jobs: Some(value),
            ecosystem: Some(value),
        }
    }

    #[test]
    fn no_present_dimension_yields_zero_result() {
        let result = aggregate(&SubScores::default(), &WeightProfile::default(), 4);
        assert_eq!(result, CompositeResult::EMPTY);
    }

    #[test]
    fn equal_sub_scores_produce_that_score() {
        for value in [0.0, 37.5, 64.21, 100.0] {
            let result = aggregate(&all(value), &WeightProfile::default(), 4);
            assert_eq!(result.composite, value);
            assert_eq!(result.completeness, 1.0);
        }
    }

    #[test]
    fn missing_dimension_weight_is_redistributed() {
        let scores = SubScores {
            code_hosting: Some(80.0),
            community: Some(40.0),
            jobs: None,
            ecosystem: None,
        };
        let profile = WeightProfile::new("test", 0.30, 0.10, 0.40, 0.20);
        let result = aggregate(&scores, &profile, 4);
        // 80 * 0.75 + 40 * 0.25
        assert_eq!(result.composite, 70.0);
        assert_eq!(result.completeness, 0.5);
    }

    #[test]
    fn effective_weights_sum_to_one() {
        let scores = SubScores {
            code_hosting: None,
            community: Some(10.0),
            jobs: Some(20.0),
            ecosystem: Some(30.0),
        };
        let weights = effective_weights(&scores, &WeightProfile::default());
        let total: f64 = weights.iter().map(|(_, weight)| weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(weights.len(), 3);
    }

    #[test]
    fn zero_weight_dimensions_share_equally() {
        let scores = SubScores {
            ecosystem: Some(30.0),
            jobs: Some(60.0),
            ..SubScores::default()
        };
        let profile = WeightProfile::new("lopsided", 1.0, 1.0, 0.0, 0.0);
        let result = aggregate(&scores, &profile, 4);
        assert_eq!(result.composite, 45.0);
    }

    #[test]
    fn completeness_uses_category_denominator() {
        let scores = SubScores {
            community: Some(55.0),
            jobs: Some(65.0),
            ..SubScores::default()
        };
        let result = aggregate(&scores, &WeightProfile::default(), 2);
        assert_eq!(result.completeness, 1.0);
        assert_eq!(completeness(3, 2), 1.0);
        assert_eq!(completeness(1, 4), 0.25);
    }

    #[test]
    fn out_of_range_sub_scores_are_clamped() {
        let scores = SubScores {
            code_hosting: Some(250.0),
            ..SubScores::default()
        };
        let result = aggregate(&scores, &WeightProfile::default(), 4);
        assert_eq!(result.composite, 100.0);
    }
}
