pub mod filesystem;

use crate::engine::pipeline::TechnologyInput;
use crate::error::{Result, TrendError};
use crate::types::history::{ScorePoint, ScoreRow};
use crate::types::metrics::RawMetric;
use crate::types::report::TechnologyFailure;
use chrono::NaiveDate;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{debug, warn};

/// One day's measurements for a set of technologies, as written by the
/// ingestion jobs.
#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub technologies: Vec<TechnologyRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TechnologyRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub metrics: Vec<RawMetric>,
    #[serde(default)]
    pub history: Vec<ScoreRow>,
}

impl TechnologyRecord {
    fn into_input(self, snapshot_date: Option<NaiveDate>) -> Result<TechnologyInput> {
        let date = self
            .date
            .or(snapshot_date)
            .ok_or_else(|| TrendError::invalid_record(&self.id, "no measurement date"))?;
        Ok(TechnologyInput {
            id: self.id,
            name: self.name,
            category: self.category,
            date,
            metrics: self.metrics,
            history: self.history,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadedInputs {
    pub inputs: Vec<TechnologyInput>,
    pub rejected: Vec<TechnologyFailure>,
    pub sha256: String,
}

pub fn load_inputs(path: &Path) -> Result<LoadedInputs> {
    let files = filesystem::list_snapshot_files(path)?;
    let mut hasher = Sha256::new();
    let mut loaded = LoadedInputs::default();

    for file in &files {
        let bytes = std::fs::read(file)?;
        hasher.update(&bytes);
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
        debug!(
            file = %file.display(),
            technologies = snapshot.technologies.len(),
            "loaded snapshot"
        );

        for record in snapshot.technologies {
            let id = record.id.clone();
            match record.into_input(snapshot.date) {
                Ok(input) => loaded.inputs.push(input),
                Err(err) => {
                    warn!(technology = %id, error = %err, "rejecting technology record");
                    loaded.rejected.push(TechnologyFailure {
                        technology: id,
                        error: err.to_string(),
                    });
                }
            }
        }
    }

    let digest = hasher.finalize();
    loaded.sha256 = format!("{digest:x}");
    Ok(loaded)
}

/// Reads a JSON array of `{date, score}` points, sorted by date.
pub fn load_points(path: &Path) -> Result<Vec<ScorePoint>> {
    if !path.is_file() {
        return Err(TrendError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let mut points: Vec<ScorePoint> = serde_json::from_str(&content)?;
    points.sort_by_key(|point| point.date);
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SNAPSHOT: &str = r#"{
        "date": "2026-10-01",
        "technologies": [
            {"id": "rust", "category": "language",
             "metrics": [{"source": "code_hosting", "metric": "star_velocity", "value": 120}]},
            {"id": "deno", "date": "2026-09-30", "metrics": []}
        ]
    }"#;

    #[test]
    fn technology_date_falls_back_to_snapshot_date() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("day.json");
        fs::write(&path, SNAPSHOT).expect("snapshot should write");

        let loaded = load_inputs(&path).expect("snapshot should load");
        assert_eq!(loaded.inputs.len(), 2);
        assert_eq!(loaded.inputs[0].date.to_string(), "2026-10-01");
        assert_eq!(loaded.inputs[1].date.to_string(), "2026-09-30");
        assert_eq!(loaded.sha256.len(), 64);
    }

    #[test]
    fn records_without_any_date_are_rejected_individually() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("undated.json");
        fs::write(
            &path,
            r#"{"technologies": [{"id": "elm"}, {"id": "nim", "date": "2026-10-01"}]}"#,
        )
        .expect("snapshot should write");

        let loaded = load_inputs(&path).expect("snapshot should load");
        assert_eq!(loaded.inputs.len(), 1);
        assert_eq!(loaded.rejected.len(), 1);
        assert_eq!(loaded.rejected[0].technology, "elm");
    }

    #[test]
    fn identical_inputs_share_a_fingerprint() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("day.json");
        fs::write(&path, SNAPSHOT).expect("snapshot should write");

        let first = load_inputs(&path).expect("first load");
        let second = load_inputs(&path).expect("second load");
        assert_eq!(first.sha256, second.sha256);
    }

    #[test]
    fn points_are_sorted_by_date() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("points.json");
        fs::write(
            &path,
            r#"[{"date": "2026-01-03", "score": 3}, {"date": "2026-01-01", "score": 1}]"#,
        )
        .expect("points should write");

        let points = load_points(&path).expect("points should load");
        assert_eq!(points[0].score, 1.0);
        assert_eq!(points[1].score, 3.0);
    }
}
