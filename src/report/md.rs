use crate::engine::anomaly::Deviation;
use crate::types::report::{BatchReport, TechnologyReport};
use crate::types::scoring::Dimension;

pub fn to_markdown(report: &BatchReport) -> String {
    let mut output = String::new();
    output.push_str("# Trend Report\n\n");
    output.push_str(&format!(
        "Engine v{} | input sha256 {}\n\n",
        report.engine_version, report.input_sha256
    ));

    if report.technologies.is_empty() {
        output.push_str("No technologies scored.\n\n");
    }
    for technology in &report.technologies {
        push_technology(&mut output, technology);
    }

    if !report.failures.is_empty() {
        output.push_str("## Failures\n\n");
        for failure in &report.failures {
            output.push_str(&format!("- {}: {}\n", failure.technology, failure.error));
        }
        output.push('\n');
    }

    output
}

fn push_technology(output: &mut String, technology: &TechnologyReport) {
    output.push_str(&format!(
        "## {} ({})\n\n",
        technology.display_name(),
        technology.date
    ));
    output.push_str(&format!(
        "Composite: {:.2} | completeness {:.2} | confidence {:.3} | {}\n\n",
        technology.result.composite,
        technology.result.completeness,
        technology.details.confidence,
        technology.details.lifecycle
    ));

    for dimension in Dimension::ALL {
        let value = technology
            .sub_scores
            .get(dimension)
            .map(|score| format!("{score:.2}"))
            .unwrap_or_else(|| "n/a".to_string());
        output.push_str(&format!("- {dimension}: {value}\n"));
    }
    output.push('\n');

    let momentum = &technology.momentum;
    output.push_str(&format!(
        "Momentum: {} (short {:+.3}, medium {:+.3}, long {:+.3}, streak {}, legacy {:.2})\n\n",
        momentum.trend,
        momentum.short_term,
        momentum.medium_term,
        momentum.long_term,
        momentum.streak,
        technology.legacy_momentum
    ));

    if technology.anomalies.is_empty() {
        output.push_str("Anomalies: none\n\n");
        return;
    }
    output.push_str("Anomalies:\n\n");
    for anomaly in &technology.anomalies {
        let deviation = match anomaly.deviation {
            Deviation::Sigma(value) => format!("{value:.2} sigma"),
            Deviation::MagnitudeProxy(value) => format!("gap index {value:.2}"),
        };
        output.push_str(&format!(
            "- [{}] {} {}/{}: expected {:.2}, actual {:.2} ({})\n",
            anomaly.severity,
            anomaly.kind,
            anomaly.source,
            anomaly.metric,
            anomaly.expected_value,
            anomaly.actual_value,
            deviation
        ));
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::momentum::MomentumAnalysis;
    use crate::types::report::TechnologyFailure;
    use crate::types::scoring::{CompositeResult, LifecycleStage, ScoreDetails, SubScores};
    use chrono::NaiveDate;

    #[test]
    fn markdown_lists_missing_dimensions_and_failures() {
        let technology = TechnologyReport {
            id: "htmx".to_string(),
            name: None,
            category: None,
            date: NaiveDate::from_ymd_opt(2026, 10, 1).expect("valid date"),
            sub_scores: SubScores {
                community: Some(55.5),
                ..SubScores::default()
            },
            result: CompositeResult {
                composite: 55.5,
                completeness: 0.25,
            },
            details: ScoreDetails {
                completeness: 0.25,
                confidence: 0.125,
                lifecycle: LifecycleStage::Niche,
            },
            momentum: MomentumAnalysis::default(),
            legacy_momentum: 0.0,
            anomalies: Vec::new(),
        };
        let report = BatchReport::new(
            "feed".to_string(),
            vec![technology],
            vec![TechnologyFailure {
                technology: "broken".to_string(),
                error: "invalid input record".to_string(),
            }],
        );

        let rendered = to_markdown(&report);
        assert!(rendered.contains("## htmx (2026-10-01)"));
        assert!(rendered.contains("- community: 55.50"));
        assert!(rendered.contains("- jobs: n/a"));
        assert!(rendered.contains("Anomalies: none"));
        assert!(rendered.contains("- broken: invalid input record"));
    }
}
