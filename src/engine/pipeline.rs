//! Per-technology scoring in the fixed stage order:
//! sub-scores, composite, momentum, anomalies.

use crate::engine::anomaly::{detect_anomalies, SignalSnapshot};
use crate::engine::lifecycle::score_details;
use crate::engine::momentum::{self, MIN_POINTS};
use crate::engine::normalize::CohortBaseline;
use crate::engine::settings::EngineSettings;
use crate::engine::subscores::compute_sub_scores;
use crate::error::{Result, TrendError};
use crate::types::history::{ScoreHistory, ScoreRow, ScorePoint};
use crate::types::metrics::{RawMetric, SignalSet};
use crate::types::report::{TechnologyFailure, TechnologyReport};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// One technology's measurements for one day plus its prior score rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyInput {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub metrics: Vec<RawMetric>,
    #[serde(default)]
    pub history: Vec<ScoreRow>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub reports: Vec<TechnologyReport>,
    pub failures: Vec<TechnologyFailure>,
}

pub fn validate(input: &TechnologyInput) -> Result<()> {
    if input.id.trim().is_empty() {
        return Err(TrendError::invalid_record("<unnamed>", "technology id is empty"));
    }
    if let Some(metric) = input.metrics.iter().find(|metric| !metric.value.is_finite()) {
        return Err(TrendError::invalid_record(
            &input.id,
            format!(
                "metric {}/{} has non-finite value",
                metric.source, metric.metric
            ),
        ));
    }
    if let Some(metric) = input
        .metrics
        .iter()
        .find(|metric| metric.date.is_some_and(|date| date != input.date))
    {
        return Err(TrendError::invalid_record(
            &input.id,
            format!(
                "metric {}/{} is dated {} but the record is for {}",
                metric.source,
                metric.metric,
                metric.date.map(|date| date.to_string()).unwrap_or_default(),
                input.date
            ),
        ));
    }
    for row in &input.history {
        let values = [
            Some(row.composite),
            row.code_hosting,
            row.community,
            row.jobs,
            row.ecosystem,
        ];
        if values
            .into_iter()
            .flatten()
            .any(|value| !value.is_finite() || !(0.0..=100.0).contains(&value))
        {
            return Err(TrendError::invalid_record(
                &input.id,
                format!("history row {} has a score outside 0-100", row.date),
            ));
        }
    }
    Ok(())
}

pub fn score_technology(
    input: &TechnologyInput,
    baseline: &CohortBaseline,
    settings: &EngineSettings,
) -> Result<TechnologyReport> {
    validate(input)?;

    let (signals, unknown) = SignalSet::from_metrics(&input.metrics);
    for metric in unknown {
        debug!(
            technology = %input.id,
            source = %metric.source,
            metric = %metric.metric,
            "ignoring unrecognized metric"
        );
    }

    let sub_scores = compute_sub_scores(&signals, baseline);
    let result = settings.composite(&sub_scores, input.category.as_deref());
    let current = ScoreRow::new(input.date, result.composite, sub_scores);

    let mut history = ScoreHistory::from_rows(input.history.iter().copied());
    let prior = history.before(input.date).to_vec();
    if sub_scores.present_count() > 0 {
        history.upsert(current);
    } else {
        debug!(technology = %input.id, "no measurements today, leaving momentum series as is");
    }
    let points = history
        .rows()
        .iter()
        .filter(|row| row.date <= input.date)
        .map(ScoreRow::point)
        .collect::<Vec<ScorePoint>>();

    let momentum = momentum::analyze(&points);
    let has_momentum = points.len() >= MIN_POINTS;
    if !has_momentum {
        debug!(technology = %input.id, points = points.len(), "not enough history for momentum");
    }

    let snapshot = SignalSnapshot {
        sub_scores,
        short_term: has_momentum.then_some(momentum.short_term),
        medium_term: has_momentum.then_some(momentum.medium_term),
    };
    let anomalies = detect_anomalies(&current, &prior, &snapshot, settings.anomaly());

    Ok(TechnologyReport {
        id: input.id.clone(),
        name: input.name.clone(),
        category: input.category.clone(),
        date: input.date,
        sub_scores,
        result,
        details: score_details(&result, &momentum),
        legacy_momentum: momentum.legacy_scalar(),
        momentum,
        anomalies,
    })
}

/// Builds one cohort baseline per measurement date.
pub fn cohort_baselines<'a>(
    inputs: impl IntoIterator<Item = &'a TechnologyInput>,
) -> BTreeMap<NaiveDate, CohortBaseline> {
    let mut by_date: BTreeMap<NaiveDate, Vec<SignalSet>> = BTreeMap::new();
    for input in inputs {
        let (signals, _) = SignalSet::from_metrics(&input.metrics);
        by_date.entry(input.date).or_default().push(signals);
    }
    by_date
        .into_iter()
        .map(|(date, cohort)| (date, CohortBaseline::from_cohort(&cohort)))
        .collect()
}

/// Scores every technology independently in parallel. Output order follows
/// input order; a bad record is reported as a failure without stopping the rest
/// and does not contribute to the cohort baselines.
pub fn score_batch(inputs: &[TechnologyInput], settings: &EngineSettings) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    let mut valid = Vec::with_capacity(inputs.len());
    for input in inputs {
        match validate(input) {
            Ok(()) => valid.push(input),
            Err(err) => record_failure(&mut outcome, input, err),
        }
    }

    let baselines = cohort_baselines(valid.iter().copied());
    let fallback = CohortBaseline::default();

    let results = valid
        .par_iter()
        .map(|&input| {
            let baseline = baselines.get(&input.date).unwrap_or(&fallback);
            (input, score_technology(input, baseline, settings))
        })
        .collect::<Vec<_>>();

    for (input, result) in results {
        match result {
            Ok(report) => outcome.reports.push(report),
            Err(err) => record_failure(&mut outcome, input, err),
        }
    }

    info!(
        scored = outcome.reports.len(),
        failed = outcome.failures.len(),
        dates = baselines.len(),
        "batch scored"
    );
    outcome
}

fn record_failure(outcome: &mut BatchOutcome, input: &TechnologyInput, err: TrendError) {
    warn!(technology = %input.id, error = %err, "skipping technology");
    outcome.failures.push(TechnologyFailure {
        technology: input.id.clone(),
        error: err.to_string(),
    });
}
