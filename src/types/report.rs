use crate::engine::anomaly::{AnomalyDetectionResult, Severity};
use crate::engine::momentum::MomentumAnalysis;
use crate::types::scoring::{CompositeResult, ScoreDetails, SubScores};
use chrono::{NaiveDate, Utc};
use serde::Serialize;

/// Everything the engine computed for one technology on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnologyReport {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub date: NaiveDate,
    pub sub_scores: SubScores,
    #[serde(flatten)]
    pub result: CompositeResult,
    pub details: ScoreDetails,
    pub momentum: MomentumAnalysis,
    pub legacy_momentum: f64,
    pub anomalies: Vec<AnomalyDetectionResult>,
}

impl TechnologyReport {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn retain_min_severity(&mut self, min: Severity) {
        self.anomalies.retain(|anomaly| anomaly.severity >= min);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnologyFailure {
    pub technology: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub engine_version: String,
    pub generated_at: String,
    pub input_sha256: String,
    pub technologies: Vec<TechnologyReport>,
    pub failures: Vec<TechnologyFailure>,
}

impl BatchReport {
    pub fn new(
        input_sha256: String,
        technologies: Vec<TechnologyReport>,
        failures: Vec<TechnologyFailure>,
    ) -> Self {
        Self {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now().to_rfc3339(),
            input_sha256,
            technologies,
            failures,
        }
    }

    pub fn anomaly_count(&self) -> usize {
        self.technologies
            .iter()
            .map(|technology| technology.anomalies.len())
            .sum()
    }
}
