use crate::engine::anomaly::{AnomalyThresholds, MIN_HISTORY};
use crate::engine::composite::DEFAULT_MAX_DIMENSIONS;
use crate::engine::settings::EngineSettings;
use crate::error::TrendError;
use crate::types::scoring::{Dimension, WeightProfile};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendConfig {
    pub weights: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryConfig>,
    pub anomaly: Option<AnomalyConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryConfig {
    pub max_dimensions: Option<usize>,
    pub weights: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnomalyConfig {
    pub min_history: Option<usize>,
    pub notable_sigma: Option<f64>,
    pub significant_sigma: Option<f64>,
    pub critical_sigma: Option<f64>,
}

impl TrendConfig {
    /// Top-level weights; keys left out keep their built-in default.
    pub fn default_profile(&self) -> WeightProfile {
        let defaults = WeightProfile::default();
        match &self.weights {
            Some(weights) => profile_from(WeightProfile::DEFAULT_NAME, weights, |dimension| {
                defaults.weight(dimension)
            }),
            None => defaults,
        }
    }

    /// Category weights; keys left out weigh zero for that category.
    pub fn category_profile(&self, category: &str) -> Option<WeightProfile> {
        self.categories
            .get(category)
            .and_then(|config| config.weights.as_ref())
            .map(|weights| profile_from(category, weights, |_| 0.0))
    }

    pub fn anomaly_thresholds(&self) -> AnomalyThresholds {
        let defaults = AnomalyThresholds::default();
        match &self.anomaly {
            Some(anomaly) => AnomalyThresholds {
                min_history: anomaly.min_history.unwrap_or(defaults.min_history),
                notable_sigma: anomaly.notable_sigma.unwrap_or(defaults.notable_sigma),
                significant_sigma: anomaly
                    .significant_sigma
                    .unwrap_or(defaults.significant_sigma),
                critical_sigma: anomaly.critical_sigma.unwrap_or(defaults.critical_sigma),
            },
            None => defaults,
        }
    }

    pub fn validate(&self) -> Result<(), TrendError> {
        if let Some(weights) = &self.weights {
            validate_weight_keys("weights", weights)?;
            validate_profile("weights", &self.default_profile())?;
        }

        for (name, category) in &self.categories {
            if name.trim().is_empty() {
                return Err(TrendError::InvalidConfig(
                    "category names must be non-empty".to_string(),
                ));
            }
            if let Some(max_dimensions) = category.max_dimensions {
                if !(1..=DEFAULT_MAX_DIMENSIONS).contains(&max_dimensions) {
                    return Err(TrendError::InvalidConfig(format!(
                        "categories.{name}.max_dimensions must be between 1 and {DEFAULT_MAX_DIMENSIONS}"
                    )));
                }
            }
            if let Some(weights) = &category.weights {
                let section = format!("categories.{name}.weights");
                validate_weight_keys(&section, weights)?;
                if let Some(profile) = self.category_profile(name) {
                    validate_profile(&section, &profile)?;
                }
            }
        }

        let thresholds = self.anomaly_thresholds();
        if thresholds.min_history < MIN_HISTORY {
            return Err(TrendError::InvalidConfig(format!(
                "anomaly.min_history must be at least {MIN_HISTORY} (found {})",
                thresholds.min_history
            )));
        }
        let sigmas = [
            thresholds.notable_sigma,
            thresholds.significant_sigma,
            thresholds.critical_sigma,
        ];
        if sigmas.iter().any(|sigma| !sigma.is_finite() || *sigma <= 0.0) {
            return Err(TrendError::InvalidConfig(
                "anomaly sigma thresholds must be positive numbers".to_string(),
            ));
        }
        if !(sigmas[0] < sigmas[1] && sigmas[1] < sigmas[2]) {
            return Err(TrendError::InvalidConfig(format!(
                "anomaly sigma thresholds must increase: notable {} < significant {} < critical {}",
                sigmas[0], sigmas[1], sigmas[2]
            )));
        }

        Ok(())
    }

    /// Validates and freezes the configuration over the built-in tables.
    pub fn settings(&self) -> Result<EngineSettings, TrendError> {
        self.validate()?;

        let builtin = EngineSettings::default();
        let mut category_profiles = builtin.category_profiles().clone();
        let mut category_dimensions = builtin.category_dimensions().clone();
        for (name, category) in &self.categories {
            if let Some(profile) = self.category_profile(name) {
                category_profiles.insert(name.clone(), profile);
            }
            if let Some(max_dimensions) = category.max_dimensions {
                category_dimensions.insert(name.clone(), max_dimensions);
            }
        }

        Ok(EngineSettings::new(
            self.default_profile(),
            category_profiles,
            category_dimensions,
            self.anomaly_thresholds(),
        ))
    }
}

fn profile_from(
    name: &str,
    weights: &BTreeMap<String, f64>,
    fallback: impl Fn(Dimension) -> f64,
) -> WeightProfile {
    let pick = |dimension: Dimension| {
        weights
            .get(dimension.as_str())
            .copied()
            .unwrap_or_else(|| fallback(dimension))
    };
    WeightProfile::new(
        name,
        pick(Dimension::CodeHosting),
        pick(Dimension::Community),
        pick(Dimension::Jobs),
        pick(Dimension::Ecosystem),
    )
}

fn validate_weight_keys(section: &str, weights: &BTreeMap<String, f64>) -> Result<(), TrendError> {
    let unknown = weights
        .keys()
        .filter(|key| Dimension::from_key(key).is_none())
        .cloned()
        .collect::<Vec<_>>();
    if !unknown.is_empty() {
        return Err(TrendError::InvalidConfig(format!(
            "{section} contains unknown key(s): {}",
            unknown.join(", ")
        )));
    }
    Ok(())
}

fn validate_profile(section: &str, profile: &WeightProfile) -> Result<(), TrendError> {
    for dimension in Dimension::ALL {
        let weight = profile.weight(dimension);
        if !weight.is_finite() || weight < 0.0 {
            return Err(TrendError::InvalidConfig(format!(
                "{section}.{dimension} must be a non-negative number (found {weight})"
            )));
        }
    }
    if profile.total() <= 0.0 {
        return Err(TrendError::InvalidConfig(format!(
            "{section} must give at least one dimension a positive weight"
        )));
    }
    Ok(())
}
