use crate::engine::normalize::{clamp_score, round_to, CohortBaseline};
use crate::types::metrics::{Signal, SignalSet};

/// Normalized (0-100) activity readings plus the raw issue close rate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CodeHostingInputs {
    pub star_velocity: Option<f64>,
    pub fork_velocity: Option<f64>,
    /// Fraction of issues closed, 0..=1.
    pub issue_close_rate: Option<f64>,
    pub contributor_growth: Option<f64>,
}

impl CodeHostingInputs {
    pub fn from_signals(signals: &SignalSet, baseline: &CohortBaseline) -> Self {
        let volume = |signal| {
            signals
                .get(signal)
                .map(|value| baseline.normalize(signal, value))
        };
        Self {
            star_velocity: volume(Signal::StarVelocity),
            fork_velocity: volume(Signal::ForkVelocity),
            issue_close_rate: signals.get(Signal::IssueCloseRate),
            contributor_growth: volume(Signal::ContributorGrowth),
        }
    }
}

pub fn code_hosting_score(inputs: &CodeHostingInputs) -> f64 {
    let mut score = 0.0;
    score += clamp_score(inputs.star_velocity.unwrap_or(0.0)) * 0.35;
    score += clamp_score(inputs.fork_velocity.unwrap_or(0.0)) * 0.15;
    score += inputs.issue_close_rate.unwrap_or(0.5).clamp(0.0, 1.0) * 100.0 * 0.20;
    score += clamp_score(inputs.contributor_growth.unwrap_or(0.0)) * 0.30;
    round_to(clamp_score(score), 2)
}
