// Engine-level properties exercised through the public library API.

use chrono::{Duration, NaiveDate};
use trendscope::engine::anomaly::{
    detect_anomalies, AnomalyKind, AnomalyThresholds, Severity, SignalSnapshot,
};
use trendscope::engine::composite::{aggregate, effective_weights};
use trendscope::engine::momentum::{analyze, Trend};
use trendscope::engine::{score_batch, EngineSettings, TechnologyInput};
use trendscope::types::history::{ScorePoint, ScoreRow};
use trendscope::types::metrics::RawMetric;
use trendscope::types::scoring::{SubScores, WeightProfile};

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid date") + Duration::days(offset)
}

/// Every combination of present/absent dimensions with varied values.
fn sub_score_grid() -> Vec<SubScores> {
    let values = [0.0, 12.5, 50.0, 99.99, 100.0];
    (0..16u32)
        .flat_map(|mask| {
            values.iter().map(move |value| SubScores {
                code_hosting: (mask & 1 != 0).then_some(*value),
                community: (mask & 2 != 0).then_some(100.0 - value),
                jobs: (mask & 4 != 0).then_some(value / 2.0),
                ecosystem: (mask & 8 != 0).then_some(*value),
            })
        })
        .collect()
}

#[test]
fn composite_and_completeness_stay_in_range() {
    let profiles = [
        WeightProfile::default(),
        WeightProfile::new("skewed", 5.0, 0.0, 1.0, 0.5),
    ];
    for scores in sub_score_grid() {
        for profile in &profiles {
            for max_dims in 1..=4 {
                let result = aggregate(&scores, profile, max_dims);
                assert!((0.0..=100.0).contains(&result.composite), "{result:?}");
                assert!((0.0..=1.0).contains(&result.completeness), "{result:?}");
            }
        }
    }
}

#[test]
fn used_weights_always_sum_to_one() {
    let profile = WeightProfile::new("skewed", 5.0, 0.0, 1.0, 0.5);
    for scores in sub_score_grid() {
        let weights = effective_weights(&scores, &profile);
        if scores.present_count() == 0 {
            assert!(weights.is_empty());
            continue;
        }
        let total: f64 = weights.iter().map(|(_, weight)| weight).sum();
        assert!((total - 1.0).abs() < 1e-9, "{scores:?} -> {total}");
    }
}

#[test]
fn two_dimension_category_is_complete_with_two_scores() {
    let settings = EngineSettings::default();
    let scores = SubScores {
        community: Some(70.0),
        jobs: Some(30.0),
        ..SubScores::default()
    };
    assert_eq!(settings.composite(&scores, Some("cloud")).completeness, 1.0);
    assert_eq!(settings.composite(&scores, Some("language")).completeness, 0.5);
}

#[test]
fn constant_history_has_no_momentum() {
    let points = (0..45)
        .map(|i| ScorePoint {
            date: day(i),
            score: 61.25,
        })
        .collect::<Vec<_>>();
    let analysis = analyze(&points);
    assert_eq!(analysis.short_term, 0.0);
    assert_eq!(analysis.medium_term, 0.0);
    assert_eq!(analysis.long_term, 0.0);
    assert_eq!(analysis.volatility, 0.0);
    assert_eq!(analysis.trend, Trend::Stable);
    assert_eq!(analysis.confidence, 0.75);
}

#[test]
fn two_point_history_returns_defaults() {
    let points = [
        ScorePoint {
            date: day(0),
            score: 10.0,
        },
        ScorePoint {
            date: day(1),
            score: 80.0,
        },
    ];
    let analysis = analyze(&points);
    assert_eq!(analysis.confidence, 0.0);
    assert_eq!(analysis.streak, 0);
    assert_eq!(analysis.trend, Trend::Stable);
    assert_eq!(analysis.legacy_scalar(), 0.0);
}

#[test]
fn legacy_scalar_stays_within_bounds() {
    let climb = (0..90)
        .map(|i| ScorePoint {
            date: day(i),
            score: if i < 60 { 0.0 } else { 100.0 },
        })
        .collect::<Vec<_>>();
    let scalar = analyze(&climb).legacy_scalar();
    assert!((-100.0..=100.0).contains(&scalar));
}

#[test]
fn five_sigma_composite_is_a_critical_spike() {
    let history = (0..30)
        .map(|i| {
            let composite = if i % 2 == 0 { 45.0 } else { 55.0 };
            ScoreRow::new(day(i), composite, SubScores::default())
        })
        .collect::<Vec<_>>();
    let current = ScoreRow::new(day(30), 75.0, SubScores::default());

    let anomalies = detect_anomalies(
        &current,
        &history,
        &SignalSnapshot::default(),
        &AnomalyThresholds::default(),
    );
    assert!(anomalies
        .iter()
        .any(|a| a.kind == AnomalyKind::Spike && a.severity == Severity::Critical));
}

#[test]
fn anomaly_detection_is_repeatable() {
    let history = (0..20)
        .map(|i| ScoreRow::new(day(i), 40.0 + (i % 5) as f64, SubScores::default()))
        .collect::<Vec<_>>();
    let current = ScoreRow::new(day(20), 90.0, SubScores::default());
    let snapshot = SignalSnapshot {
        sub_scores: SubScores {
            code_hosting: Some(90.0),
            community: Some(40.0),
            jobs: Some(10.0),
            ecosystem: None,
        },
        short_term: Some(6.0),
        medium_term: Some(-2.0),
    };
    let thresholds = AnomalyThresholds::default();

    let first = detect_anomalies(&current, &history, &snapshot, &thresholds);
    let second = detect_anomalies(&current, &history, &snapshot, &thresholds);
    assert_eq!(first, second);
    assert!(first.len() >= 3);
    assert!(first
        .windows(2)
        .all(|pair| pair[0].severity >= pair[1].severity));
}

#[test]
fn fewer_than_seven_rows_never_flag() {
    let history = (0..5)
        .map(|i| ScoreRow::new(day(i), 50.0 + i as f64, SubScores::default()))
        .collect::<Vec<_>>();
    let current = ScoreRow::new(day(5), 100.0, SubScores::default());
    let snapshot = SignalSnapshot {
        sub_scores: SubScores {
            code_hosting: Some(100.0),
            community: Some(0.0),
            jobs: Some(0.0),
            ecosystem: None,
        },
        short_term: Some(50.0),
        medium_term: Some(-50.0),
    };
    assert!(detect_anomalies(&current, &history, &snapshot, &AnomalyThresholds::default())
        .is_empty());
}

#[test]
fn divergence_severity_tracks_the_gap() {
    let history = (0..10)
        .map(|i| ScoreRow::new(day(i), 50.0 + (i % 3) as f64, SubScores::default()))
        .collect::<Vec<_>>();
    let current = ScoreRow::new(day(10), 51.0, SubScores::default());
    let thresholds = AnomalyThresholds::default();

    let notable = SignalSnapshot {
        sub_scores: SubScores {
            code_hosting: Some(80.0),
            community: Some(60.0),
            ..SubScores::default()
        },
        ..SignalSnapshot::default()
    };
    let found = detect_anomalies(&current, &history, &notable, &thresholds);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, AnomalyKind::Divergence);
    assert_eq!(found[0].severity, Severity::Notable);

    let significant = SignalSnapshot {
        sub_scores: SubScores {
            code_hosting: Some(80.0),
            community: Some(50.0),
            ..SubScores::default()
        },
        ..SignalSnapshot::default()
    };
    let found = detect_anomalies(&current, &history, &significant, &thresholds);
    assert_eq!(found[0].severity, Severity::Significant);
}

fn batch_inputs() -> Vec<TechnologyInput> {
    let history = |base: f64| {
        (1..=20)
            .map(|back| {
                ScoreRow::new(
                    day(30 - back),
                    base + (back % 4) as f64,
                    SubScores::default(),
                )
            })
            .collect::<Vec<_>>()
    };
    vec![
        TechnologyInput {
            id: "rust".to_string(),
            name: Some("Rust".to_string()),
            category: Some("language".to_string()),
            date: day(30),
            metrics: vec![
                RawMetric::new("code_hosting", "star_velocity", 900.0),
                RawMetric::new("code_hosting", "issue_close_rate", 0.8),
                RawMetric::new("forum_primary", "mentions", 300.0),
                RawMetric::new("forum_primary", "sentiment", 0.7),
                RawMetric::new("job_board_primary", "postings", 1200.0),
                RawMetric::new("package_registry", "downloads", 5_000_000.0),
                RawMetric::new("package_registry", "growth_rate", 0.2),
            ],
            history: history(40.0),
        },
        TechnologyInput {
            id: "cloudy".to_string(),
            name: None,
            category: Some("cloud".to_string()),
            date: day(30),
            metrics: vec![
                RawMetric::new("forum_secondary", "mentions", 40.0),
                RawMetric::new("job_board_secondary", "postings", 300.0),
            ],
            history: history(20.0),
        },
    ]
}

#[test]
fn pipeline_is_deterministic() {
    let settings = EngineSettings::default();
    let inputs = batch_inputs();
    let first = score_batch(&inputs, &settings);
    let second = score_batch(&inputs, &settings);
    assert_eq!(first, second);
    assert_eq!(first.reports.len(), 2);
    assert!(first.failures.is_empty());
    assert_eq!(first.reports[1].result.completeness, 1.0);
}
