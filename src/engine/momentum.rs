//! Multi-window rate-of-change analysis over a composite score history.

use crate::engine::normalize::{population_std_dev, round_to};
use crate::types::history::ScorePoint;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_POINTS: usize = 3;
pub const SHORT_WINDOW: usize = 7;
pub const MEDIUM_WINDOW: usize = 30;
pub const LONG_WINDOW: usize = 90;
/// Point count at which confidence saturates.
const FULL_CONFIDENCE_POINTS: f64 = 60.0;

const VOLATILE_THRESHOLD: f64 = 3.0;
const REVERSAL_MAGNITUDE: f64 = 0.5;
const MOVING_THRESHOLD: f64 = 0.3;
const ACCELERATION_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Accelerating,
    Decelerating,
    #[default]
    Stable,
    Volatile,
    Reversing,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Accelerating => "accelerating",
            Self::Decelerating => "decelerating",
            Self::Stable => "stable",
            Self::Volatile => "volatile",
            Self::Reversing => "reversing",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentumAnalysis {
    pub short_term: f64,
    pub medium_term: f64,
    pub long_term: f64,
    pub acceleration: f64,
    pub volatility: f64,
    pub trend: Trend,
    pub confidence: f64,
    pub streak: i32,
}

impl MomentumAnalysis {
    /// Single-number momentum kept for consumers that predate the full
    /// analysis. The 0.4/0.6 blend and x10 scale are a fixed heuristic, not a
    /// derived statistic; downstream ranges depend on them staying as is.
    pub fn legacy_scalar(&self) -> f64 {
        let blended = (self.short_term * 0.4 + self.medium_term * 0.6) * 10.0;
        round_to(blended, 2).clamp(-100.0, 100.0)
    }
}

/// Exponential moving average seeded at the first value, `k = 2 / (window + 1)`.
pub fn ema(values: &[f64], window: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    let k = 2.0 / (window.max(1) as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut current = first;
    out.push(current);
    for value in &values[1..] {
        current = value * k + current * (1.0 - k);
        out.push(current);
    }
    out
}

fn last_delta(series: &[f64]) -> f64 {
    match series {
        [.., previous, last] => last - previous,
        _ => 0.0,
    }
}

fn deltas(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Consecutive most-recent deltas sharing the latest delta's sign;
/// negative for a downward run.
pub fn streak(deltas: &[f64]) -> i32 {
    let Some(&latest) = deltas.last() else {
        return 0;
    };
    if latest == 0.0 {
        return 0;
    }
    let upward = latest > 0.0;
    let run = deltas
        .iter()
        .rev()
        .take_while(|delta| if upward { **delta > 0.0 } else { **delta < 0.0 })
        .count() as i32;
    if upward {
        run
    } else {
        -run
    }
}

pub fn classify(short_term: f64, medium_term: f64, acceleration: f64, volatility: f64) -> Trend {
    if volatility > VOLATILE_THRESHOLD {
        return Trend::Volatile;
    }
    let disagree = short_term.signum() != medium_term.signum();
    if disagree
        && short_term.abs() > REVERSAL_MAGNITUDE
        && medium_term.abs() > REVERSAL_MAGNITUDE
    {
        return Trend::Reversing;
    }
    if short_term.abs() > MOVING_THRESHOLD && acceleration > ACCELERATION_THRESHOLD {
        return Trend::Accelerating;
    }
    if short_term.abs() > MOVING_THRESHOLD && acceleration < -ACCELERATION_THRESHOLD {
        return Trend::Decelerating;
    }
    Trend::Stable
}

/// Analyzes a chronological `{date, score}` series. Fewer than three points
/// yields the neutral default with zero confidence.
pub fn analyze(points: &[ScorePoint]) -> MomentumAnalysis {
    if points.len() < MIN_POINTS {
        return MomentumAnalysis::default();
    }

    let scores = points.iter().map(|point| point.score).collect::<Vec<_>>();
    let n = scores.len();

    let short_term = last_delta(&ema(&scores, SHORT_WINDOW));
    let medium_term = last_delta(&ema(&scores, MEDIUM_WINDOW));
    let long_term = last_delta(&ema(&scores, LONG_WINDOW.min(n)));
    let acceleration = short_term - medium_term;

    let raw_deltas = deltas(&scores);
    let volatility = population_std_dev(&raw_deltas);
    let trend = classify(short_term, medium_term, acceleration, volatility);

    MomentumAnalysis {
        short_term: round_to(short_term, 3),
        medium_term: round_to(medium_term, 3),
        long_term: round_to(long_term, 3),
        acceleration: round_to(acceleration, 3),
        volatility: round_to(volatility, 3),
        trend,
        confidence: round_to((n as f64 / FULL_CONFIDENCE_POINTS).min(1.0), 3),
        streak: streak(&raw_deltas),
    }
}
