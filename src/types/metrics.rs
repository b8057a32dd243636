use crate::types::scoring::Dimension;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One measured value for one technology on one day from one source/metric pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMetric {
    pub source: String,
    pub metric: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl RawMetric {
    pub fn new(source: impl Into<String>, metric: impl Into<String>, value: f64) -> Self {
        Self {
            source: source.into(),
            metric: metric.into(),
            value,
            date: None,
        }
    }
}

/// How a signal's raw value is turned into a calculator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    /// Heavy-tailed count, normalized against the same-day cohort.
    Volume,
    /// Fraction in [0, 1], used directly.
    Ratio,
    /// Signed growth rate, used raw.
    Growth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal {
    StarVelocity,
    ForkVelocity,
    IssueCloseRate,
    ContributorGrowth,
    ForumPrimaryMentions,
    ForumPrimarySentiment,
    ForumSecondaryMentions,
    ForumSecondarySentiment,
    ArticleVolume,
    NewsMentions,
    JobBoardPrimary,
    JobBoardSecondary,
    JobBoardTertiary,
    Downloads,
    DownloadGrowth,
    QuestionsTotal,
    QuestionsRecent,
    Dependents,
}

impl Signal {
    pub const ALL: [Signal; 18] = [
        Signal::StarVelocity,
        Signal::ForkVelocity,
        Signal::IssueCloseRate,
        Signal::ContributorGrowth,
        Signal::ForumPrimaryMentions,
        Signal::ForumPrimarySentiment,
        Signal::ForumSecondaryMentions,
        Signal::ForumSecondarySentiment,
        Signal::ArticleVolume,
        Signal::NewsMentions,
        Signal::JobBoardPrimary,
        Signal::JobBoardSecondary,
        Signal::JobBoardTertiary,
        Signal::Downloads,
        Signal::DownloadGrowth,
        Signal::QuestionsTotal,
        Signal::QuestionsRecent,
        Signal::Dependents,
    ];

    /// The `(source, metric)` pair ingestion uses for this signal.
    pub fn key(self) -> (&'static str, &'static str) {
        match self {
            Self::StarVelocity => ("code_hosting", "star_velocity"),
            Self::ForkVelocity => ("code_hosting", "fork_velocity"),
            Self::IssueCloseRate => ("code_hosting", "issue_close_rate"),
            Self::ContributorGrowth => ("code_hosting", "contributor_growth"),
            Self::ForumPrimaryMentions => ("forum_primary", "mentions"),
            Self::ForumPrimarySentiment => ("forum_primary", "sentiment"),
            Self::ForumSecondaryMentions => ("forum_secondary", "mentions"),
            Self::ForumSecondarySentiment => ("forum_secondary", "sentiment"),
            Self::ArticleVolume => ("articles", "count"),
            Self::NewsMentions => ("news", "mentions"),
            Self::JobBoardPrimary => ("job_board_primary", "postings"),
            Self::JobBoardSecondary => ("job_board_secondary", "postings"),
            Self::JobBoardTertiary => ("job_board_tertiary", "postings"),
            Self::Downloads => ("package_registry", "downloads"),
            Self::DownloadGrowth => ("package_registry", "growth_rate"),
            Self::QuestionsTotal => ("qa_site", "questions_total"),
            Self::QuestionsRecent => ("qa_site", "questions_recent"),
            Self::Dependents => ("dependency_graph", "dependents"),
        }
    }

    pub fn kind(self) -> SignalKind {
        match self {
            Self::IssueCloseRate | Self::ForumPrimarySentiment | Self::ForumSecondarySentiment => {
                SignalKind::Ratio
            }
            Self::DownloadGrowth => SignalKind::Growth,
            _ => SignalKind::Volume,
        }
    }

    pub fn dimension(self) -> Dimension {
        match self {
            Self::StarVelocity
            | Self::ForkVelocity
            | Self::IssueCloseRate
            | Self::ContributorGrowth => Dimension::CodeHosting,
            Self::ForumPrimaryMentions
            | Self::ForumPrimarySentiment
            | Self::ForumSecondaryMentions
            | Self::ForumSecondarySentiment
            | Self::ArticleVolume
            | Self::NewsMentions => Dimension::Community,
            Self::JobBoardPrimary | Self::JobBoardSecondary | Self::JobBoardTertiary => {
                Dimension::Jobs
            }
            Self::Downloads
            | Self::DownloadGrowth
            | Self::QuestionsTotal
            | Self::QuestionsRecent
            | Self::Dependents => Dimension::Ecosystem,
        }
    }

    pub fn lookup(source: &str, metric: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|signal| signal.key() == (source, metric))
    }
}

/// The recognized signals measured for one technology on one day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalSet {
    values: BTreeMap<Signal, f64>,
}

impl SignalSet {
    /// Collects recognized metrics; later duplicates overwrite earlier ones.
    /// Returns the set plus the metrics that matched no known signal.
    pub fn from_metrics(metrics: &[RawMetric]) -> (Self, Vec<&RawMetric>) {
        let mut set = Self::default();
        let mut unknown = Vec::new();
        for metric in metrics {
            match Signal::lookup(&metric.source, &metric.metric) {
                Some(signal) => {
                    set.values.insert(signal, metric.value);
                }
                None => unknown.push(metric),
            }
        }
        (set, unknown)
    }

    pub fn insert(&mut self, signal: Signal, value: f64) {
        self.values.insert(signal, value);
    }

    pub fn get(&self, signal: Signal) -> Option<f64> {
        self.values.get(&signal).copied()
    }

    pub fn has_dimension(&self, dimension: Dimension) -> bool {
        self.values
            .keys()
            .any(|signal| signal.dimension() == dimension)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Signal, f64)> + '_ {
        self.values.iter().map(|(signal, value)| (*signal, *value))
    }
}
