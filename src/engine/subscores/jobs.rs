use crate::engine::normalize::{clamp_score, round_to, CohortBaseline};
use crate::types::metrics::{Signal, SignalSet};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JobsInputs {
    pub primary_postings: Option<f64>,
    pub secondary_postings: Option<f64>,
    pub tertiary_postings: Option<f64>,
}

impl JobsInputs {
    pub fn from_signals(signals: &SignalSet, baseline: &CohortBaseline) -> Self {
        let volume = |signal| {
            signals
                .get(signal)
                .map(|value| baseline.normalize(signal, value))
        };
        Self {
            primary_postings: volume(Signal::JobBoardPrimary),
            secondary_postings: volume(Signal::JobBoardSecondary),
            tertiary_postings: volume(Signal::JobBoardTertiary),
        }
    }
}

pub fn jobs_score(inputs: &JobsInputs) -> f64 {
    let score = clamp_score(inputs.primary_postings.unwrap_or(0.0)) * 0.40
        + clamp_score(inputs.secondary_postings.unwrap_or(0.0)) * 0.40
        + clamp_score(inputs.tertiary_postings.unwrap_or(0.0)) * 0.20;
    round_to(clamp_score(score), 2)
}
