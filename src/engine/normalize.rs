//! Statistical transforms shared by the sub-score formulas.

use crate::types::metrics::{Signal, SignalKind, SignalSet};
use std::collections::BTreeMap;

/// Logistic slope that makes the curve track the standard normal CDF.
const LOGISTIC_SLOPE: f64 = 1.702;

/// Maps a z-score onto 0-100 centered at 50, approximating the normal
/// percentile. Saturates toward 0 and 100 for large |z|.
pub fn z_score_to_100(z: f64) -> f64 {
    if z.is_nan() {
        return 50.0;
    }
    let scaled = 100.0 / (1.0 + (-LOGISTIC_SLOPE * z).exp());
    scaled.clamp(0.0, 100.0)
}

/// Linear clamp-and-scale to [0, 100]. A degenerate range yields the midpoint.
pub fn min_max_normalize(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() || !(max - min).is_finite() || max - min <= f64::EPSILON {
        return 50.0;
    }
    (((value - min) / (max - min)) * 100.0).clamp(0.0, 100.0)
}

pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;
    // avoid "-0" in reports
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0 for fewer than two values.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values
        .iter()
        .map(|value| (value - avg).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SignalStats {
    mean: f64,
    std_dev: f64,
}

/// Per-signal log-scale statistics over the technologies measured on one day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortBaseline {
    stats: BTreeMap<Signal, SignalStats>,
}

impl CohortBaseline {
    pub fn from_cohort<'a>(cohort: impl IntoIterator<Item = &'a SignalSet>) -> Self {
        let mut samples: BTreeMap<Signal, Vec<f64>> = BTreeMap::new();
        for set in cohort {
            for (signal, value) in set.iter() {
                if signal.kind() == SignalKind::Volume && value.is_finite() {
                    samples.entry(signal).or_default().push(log_volume(value));
                }
            }
        }

        let stats = samples
            .into_iter()
            .map(|(signal, values)| {
                let stats = SignalStats {
                    mean: mean(&values),
                    std_dev: population_std_dev(&values),
                };
                (signal, stats)
            })
            .collect();
        Self { stats }
    }

    /// Normalizes a volume reading to 0-100 relative to the cohort.
    /// Unknown signals and zero-variance cohorts map to 50.
    pub fn normalize(&self, signal: Signal, value: f64) -> f64 {
        match self.stats.get(&signal) {
            Some(stats) if stats.std_dev > f64::EPSILON => {
                z_score_to_100((log_volume(value) - stats.mean) / stats.std_dev)
            }
            _ => 50.0,
        }
    }
}

fn log_volume(value: f64) -> f64 {
    value.max(0.0).ln_1p()
}
