pub mod code_hosting;
pub mod community;
pub mod ecosystem;
pub mod jobs;

use crate::engine::normalize::CohortBaseline;
use crate::types::metrics::SignalSet;
use crate::types::scoring::{Dimension, SubScores};
use code_hosting::{code_hosting_score, CodeHostingInputs};
use community::{community_score, CommunityInputs};
use ecosystem::{ecosystem_score, EcosystemInputs};
use jobs::{jobs_score, JobsInputs};

/// Runs every calculator whose dimension has at least one measured signal.
/// Dimensions without any signal stay `None`.
pub fn compute_sub_scores(signals: &SignalSet, baseline: &CohortBaseline) -> SubScores {
    let mut scores = SubScores::default();
    for dimension in Dimension::ALL {
        if !signals.has_dimension(dimension) {
            continue;
        }
        let score = match dimension {
            Dimension::CodeHosting => {
                code_hosting_score(&CodeHostingInputs::from_signals(signals, baseline))
            }
            Dimension::Community => {
                community_score(&CommunityInputs::from_signals(signals, baseline))
            }
            Dimension::Jobs => jobs_score(&JobsInputs::from_signals(signals, baseline)),
            Dimension::Ecosystem => {
                ecosystem_score(&EcosystemInputs::from_signals(signals, baseline))
            }
        };
        scores.set(dimension, Some(score));
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::metrics::Signal;

    #[test]
    fn only_measured_dimensions_are_scored() {
        let mut signals = SignalSet::default();
        signals.insert(Signal::StarVelocity, 120.0);
        signals.insert(Signal::JobBoardPrimary, 40.0);

        let baseline = CohortBaseline::from_cohort([&signals]);
        let scores = compute_sub_scores(&signals, &baseline);
        assert!(scores.code_hosting.is_some());
        assert!(scores.jobs.is_some());
        assert_eq!(scores.community, None);
        assert_eq!(scores.ecosystem, None);
    }

    #[test]
    fn single_member_cohort_scores_volumes_at_midpoint() {
        let mut signals = SignalSet::default();
        signals.insert(Signal::JobBoardPrimary, 900.0);
        signals.insert(Signal::JobBoardSecondary, 12.0);
        signals.insert(Signal::JobBoardTertiary, 3.0);

        let baseline = CohortBaseline::from_cohort([&signals]);
        let scores = compute_sub_scores(&signals, &baseline);
        assert_eq!(scores.jobs, Some(50.0));
    }
}
