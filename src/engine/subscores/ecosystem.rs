use crate::engine::normalize::{clamp_score, min_max_normalize, round_to, CohortBaseline};
use crate::types::metrics::{Signal, SignalSet};

const GROWTH_FLOOR: f64 = -0.5;
const GROWTH_CEILING: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EcosystemInputs {
    pub downloads: Option<f64>,
    /// Raw period-over-period download growth (0.25 = +25%).
    pub growth_rate: Option<f64>,
    pub questions_total: Option<f64>,
    pub questions_recent: Option<f64>,
    pub dependents: Option<f64>,
}

impl EcosystemInputs {
    pub fn from_signals(signals: &SignalSet, baseline: &CohortBaseline) -> Self {
        let volume = |signal| {
            signals
                .get(signal)
                .map(|value| baseline.normalize(signal, value))
        };
        Self {
            downloads: volume(Signal::Downloads),
            growth_rate: signals.get(Signal::DownloadGrowth),
            questions_total: volume(Signal::QuestionsTotal),
            questions_recent: volume(Signal::QuestionsRecent),
            dependents: volume(Signal::Dependents),
        }
    }
}

/// Growth clamped to [-0.5, 1.0] and scaled onto 0-100.
pub fn growth_term(growth_rate: f64) -> f64 {
    let clamped = growth_rate.clamp(GROWTH_FLOOR, GROWTH_CEILING);
    min_max_normalize(clamped, GROWTH_FLOOR, GROWTH_CEILING)
}

pub fn ecosystem_score(inputs: &EcosystemInputs) -> f64 {
    let mut score = 0.0;
    score += clamp_score(inputs.downloads.unwrap_or(0.0)) * 0.20;
    score += growth_term(inputs.growth_rate.unwrap_or(0.0)) * 0.15;
    score += clamp_score(inputs.questions_total.unwrap_or(0.0)) * 0.15;
    score += clamp_score(inputs.questions_recent.unwrap_or(0.0)) * 0.15;
    score += clamp_score(inputs.dependents.unwrap_or(0.0)) * 0.35;
    round_to(clamp_score(score), 2)
}
