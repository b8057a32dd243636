//! Immutable engine configuration shared read-only by every worker.

use crate::engine::anomaly::AnomalyThresholds;
use crate::engine::composite::{self, DEFAULT_MAX_DIMENSIONS};
use crate::types::scoring::{CompositeResult, SubScores, WeightProfile};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    default_profile: WeightProfile,
    category_profiles: BTreeMap<String, WeightProfile>,
    category_dimensions: BTreeMap<String, usize>,
    anomaly: AnomalyThresholds,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let category_profiles = BTreeMap::from([(
            "cloud".to_string(),
            WeightProfile::new("cloud", 0.10, 0.40, 0.50, 0.0),
        )]);
        let category_dimensions =
            BTreeMap::from([("cloud".to_string(), 2), ("platform".to_string(), 3)]);
        Self {
            default_profile: WeightProfile::default(),
            category_profiles,
            category_dimensions,
            anomaly: AnomalyThresholds::default(),
        }
    }
}

impl EngineSettings {
    pub fn new(
        default_profile: WeightProfile,
        category_profiles: BTreeMap<String, WeightProfile>,
        category_dimensions: BTreeMap<String, usize>,
        anomaly: AnomalyThresholds,
    ) -> Self {
        Self {
            default_profile,
            category_profiles: category_profiles
                .into_iter()
                .map(|(category, profile)| (category_key(&category), profile))
                .collect(),
            category_dimensions: category_dimensions
                .into_iter()
                .map(|(category, dims)| (category_key(&category), dims))
                .collect(),
            anomaly,
        }
    }

    pub fn default_profile(&self) -> &WeightProfile {
        &self.default_profile
    }

    pub fn category_profiles(&self) -> &BTreeMap<String, WeightProfile> {
        &self.category_profiles
    }

    pub fn category_dimensions(&self) -> &BTreeMap<String, usize> {
        &self.category_dimensions
    }

    pub fn anomaly(&self) -> &AnomalyThresholds {
        &self.anomaly
    }

    pub fn profile_for(&self, category: Option<&str>) -> &WeightProfile {
        category
            .and_then(|category| self.category_profiles.get(&category_key(category)))
            .unwrap_or(&self.default_profile)
    }

    pub fn max_dimensions_for(&self, category: Option<&str>) -> usize {
        category
            .and_then(|category| self.category_dimensions.get(&category_key(category)))
            .copied()
            .unwrap_or(DEFAULT_MAX_DIMENSIONS)
    }

    pub fn composite(&self, scores: &SubScores, category: Option<&str>) -> CompositeResult {
        composite::aggregate(
            scores,
            self.profile_for(category),
            self.max_dimensions_for(category),
        )
    }
}

fn category_key(category: &str) -> String {
    category.trim().to_lowercase()
}
