use crate::types::report::BatchReport;

pub fn to_json(report: &BatchReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::anomaly::{AnomalyDetectionResult, AnomalyKind, Deviation, Severity};
    use crate::engine::momentum::MomentumAnalysis;
    use crate::types::report::TechnologyReport;
    use crate::types::scoring::{CompositeResult, LifecycleStage, ScoreDetails, SubScores};
    use chrono::NaiveDate;

    fn sample() -> BatchReport {
        let technology = TechnologyReport {
            id: "rust".to_string(),
            name: Some("Rust".to_string()),
            category: Some("language".to_string()),
            date: NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date"),
            sub_scores: SubScores {
                code_hosting: Some(80.0),
                community: Some(60.0),
                jobs: None,
                ecosystem: None,
            },
            result: CompositeResult {
                composite: 72.0,
                completeness: 0.5,
            },
            details: ScoreDetails {
                completeness: 0.5,
                confidence: 0.25,
                lifecycle: LifecycleStage::Mature,
            },
            momentum: MomentumAnalysis::default(),
            legacy_momentum: 0.0,
            anomalies: vec![AnomalyDetectionResult {
                kind: AnomalyKind::Divergence,
                severity: Severity::Notable,
                source: "code_hosting_vs_community".to_string(),
                metric: "score_gap".to_string(),
                expected_value: 60.0,
                actual_value: 80.0,
                deviation: Deviation::MagnitudeProxy(4.0),
            }],
        };
        BatchReport::new("abc".to_string(), vec![technology], Vec::new())
    }

    #[test]
    fn json_report_flattens_composite_and_tags_deviation() {
        let rendered = to_json(&sample()).expect("json should serialize");
        assert!(rendered.contains("\"composite\": 72.0"));
        assert!(rendered.contains("\"jobs\": null"));
        assert!(rendered.contains("\"kind\": \"magnitude_proxy\""));
        assert!(rendered.contains("\"lifecycle\": \"mature\""));
        assert!(rendered.contains("\"trend\": \"stable\""));
    }
}
