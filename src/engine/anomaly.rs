//! Statistical anomaly flags for one technology's current score row.
//!
//! Per-metric checks report a true z-score. Trend-break and divergence checks
//! report a magnitude proxy instead; the two are kept apart in [`Deviation`].

use crate::engine::normalize::{mean, population_std_dev, round_to};
use crate::types::history::{ScoreRow, SeriesMetric};
use crate::types::scoring::{Dimension, SubScores};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fewest prior rows a per-metric check will run on. Config may raise it.
pub const MIN_HISTORY: usize = 7;

const TREND_BREAK_MIN_GAP: f64 = 3.0;
const TREND_BREAK_SIGNIFICANT_GAP: f64 = 10.0;
const TREND_BREAK_PROXY_DIVISOR: f64 = 3.0;

const INTEREST_GAP_NOTABLE: f64 = 15.0;
const INTEREST_GAP_SIGNIFICANT: f64 = 25.0;
const DEMAND_GAP_NOTABLE: f64 = 20.0;
const DEMAND_GAP_SIGNIFICANT: f64 = 30.0;
const DIVERGENCE_PROXY_DIVISOR: f64 = 5.0;

const CHECKED_SERIES: [SeriesMetric; 4] = [
    SeriesMetric::Composite,
    SeriesMetric::Dimension(Dimension::CodeHosting),
    SeriesMetric::Dimension(Dimension::Community),
    SeriesMetric::Dimension(Dimension::Jobs),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    Spike,
    Drop,
    Divergence,
    TrendBreak,
    /// Reserved for cross-series correlation checks; no detector emits it yet.
    CorrelationBreak,
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Spike => "spike",
            Self::Drop => "drop",
            Self::Divergence => "divergence",
            Self::TrendBreak => "trend_break",
            Self::CorrelationBreak => "correlation_break",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Notable,
    Significant,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Info => "info",
            Self::Notable => "notable",
            Self::Significant => "significant",
            Self::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// How far the actual value sits from the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Deviation {
    /// Standard deviations from the historical mean.
    Sigma(f64),
    /// Gap divided by a fixed constant; comparable in tiers, not a probability.
    MagnitudeProxy(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyDetectionResult {
    pub kind: AnomalyKind,
    pub severity: Severity,
    pub source: String,
    pub metric: String,
    pub expected_value: f64,
    pub actual_value: f64,
    pub deviation: Deviation,
}

/// z-score cut-offs and minimum history for the per-metric checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyThresholds {
    pub min_history: usize,
    pub notable_sigma: f64,
    pub significant_sigma: f64,
    pub critical_sigma: f64,
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            min_history: MIN_HISTORY,
            notable_sigma: 2.5,
            significant_sigma: 3.5,
            critical_sigma: 4.5,
        }
    }
}

impl AnomalyThresholds {
    pub fn severity_for(&self, z: f64) -> Option<Severity> {
        if z > self.critical_sigma {
            Some(Severity::Critical)
        } else if z > self.significant_sigma {
            Some(Severity::Significant)
        } else if z > self.notable_sigma {
            Some(Severity::Notable)
        } else {
            None
        }
    }
}

/// Current sub-scores plus momentum deltas, when known.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignalSnapshot {
    pub sub_scores: SubScores,
    pub short_term: Option<f64>,
    pub medium_term: Option<f64>,
}

/// Produces anomalies ordered by descending severity; ties keep check order
/// (per-metric, trend break, divergences). Too little history returns nothing.
pub fn detect_anomalies(
    current: &ScoreRow,
    history: &[ScoreRow],
    snapshot: &SignalSnapshot,
    thresholds: &AnomalyThresholds,
) -> Vec<AnomalyDetectionResult> {
    if history.len() < thresholds.min_history {
        return Vec::new();
    }

    let mut anomalies = CHECKED_SERIES
        .into_iter()
        .filter_map(|metric| metric_outlier(metric, current, history, thresholds))
        .collect::<Vec<_>>();
    anomalies.extend(trend_break(snapshot));
    anomalies.extend(interest_divergence(&snapshot.sub_scores));
    anomalies.extend(demand_divergence(&snapshot.sub_scores));

    anomalies.sort_by(|a, b| b.severity.cmp(&a.severity));
    anomalies
}

fn metric_outlier(
    metric: SeriesMetric,
    current: &ScoreRow,
    history: &[ScoreRow],
    thresholds: &AnomalyThresholds,
) -> Option<AnomalyDetectionResult> {
    // zero means nothing was measured, on either side
    let actual = current.value(metric).filter(|value| *value != 0.0)?;
    let values = history
        .iter()
        .filter_map(|row| row.value(metric))
        .filter(|value| *value != 0.0)
        .collect::<Vec<_>>();
    if values.len() < thresholds.min_history {
        return None;
    }

    let expected = mean(&values);
    let std_dev = population_std_dev(&values);
    if std_dev <= f64::EPSILON {
        return None;
    }
    let z = (actual - expected).abs() / std_dev;
    let severity = thresholds.severity_for(z)?;

    Some(AnomalyDetectionResult {
        kind: if actual > expected {
            AnomalyKind::Spike
        } else {
            AnomalyKind::Drop
        },
        severity,
        source: metric.source().to_string(),
        metric: "score".to_string(),
        expected_value: round_to(expected, 2),
        actual_value: round_to(actual, 2),
        deviation: Deviation::Sigma(round_to(z, 2)),
    })
}

fn trend_break(snapshot: &SignalSnapshot) -> Option<AnomalyDetectionResult> {
    let short = snapshot.short_term?;
    let medium = snapshot.medium_term?;
    if short.signum() == medium.signum() || short == 0.0 || medium == 0.0 {
        return None;
    }
    let gap = (short - medium).abs();
    if gap <= TREND_BREAK_MIN_GAP {
        return None;
    }

    Some(AnomalyDetectionResult {
        kind: AnomalyKind::TrendBreak,
        severity: if gap > TREND_BREAK_SIGNIFICANT_GAP {
            Severity::Significant
        } else {
            Severity::Notable
        },
        source: "momentum".to_string(),
        metric: "short_vs_medium".to_string(),
        expected_value: round_to(medium, 3),
        actual_value: round_to(short, 3),
        deviation: Deviation::MagnitudeProxy(round_to(gap / TREND_BREAK_PROXY_DIVISOR, 2)),
    })
}

fn interest_divergence(scores: &SubScores) -> Option<AnomalyDetectionResult> {
    let hosting = scores.code_hosting?;
    let community = scores.community?;
    divergence(
        "code_hosting_vs_community",
        community,
        hosting,
        INTEREST_GAP_NOTABLE,
        INTEREST_GAP_SIGNIFICANT,
    )
}

fn demand_divergence(scores: &SubScores) -> Option<AnomalyDetectionResult> {
    let hosting = scores.code_hosting?;
    let community = scores.community?;
    let jobs = scores.jobs?;
    let interest = (hosting + community) / 2.0;
    divergence(
        "jobs_vs_interest",
        interest,
        jobs,
        DEMAND_GAP_NOTABLE,
        DEMAND_GAP_SIGNIFICANT,
    )
}

fn divergence(
    source: &str,
    expected: f64,
    actual: f64,
    notable_gap: f64,
    significant_gap: f64,
) -> Option<AnomalyDetectionResult> {
    let gap = (actual - expected).abs();
    if gap <= notable_gap {
        return None;
    }
    Some(AnomalyDetectionResult {
        kind: AnomalyKind::Divergence,
        severity: if gap > significant_gap {
            Severity::Significant
        } else {
            Severity::Notable
        },
        source: source.to_string(),
        metric: "score_gap".to_string(),
        expected_value: round_to(expected, 2),
        actual_value: round_to(actual, 2),
        deviation: Deviation::MagnitudeProxy(round_to(gap / DIVERGENCE_PROXY_DIVISOR, 2)),
    })
}
