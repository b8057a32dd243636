use serde::{Deserialize, Serialize};
use std::fmt;

pub type Score = f64;

/// One of the four signal dimensions that feed the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    CodeHosting,
    Community,
    Jobs,
    Ecosystem,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::CodeHosting,
        Dimension::Community,
        Dimension::Jobs,
        Dimension::Ecosystem,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CodeHosting => "code_hosting",
            Self::Community => "community",
            Self::Jobs => "jobs",
            Self::Ecosystem => "ecosystem",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dimension| dimension.as_str() == key)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-technology, per-day sub-scores. `None` means no data for that
/// dimension today, which is not the same as a zero score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub code_hosting: Option<Score>,
    pub community: Option<Score>,
    pub jobs: Option<Score>,
    pub ecosystem: Option<Score>,
}

impl SubScores {
    pub fn get(&self, dimension: Dimension) -> Option<Score> {
        match dimension {
            Dimension::CodeHosting => self.code_hosting,
            Dimension::Community => self.community,
            Dimension::Jobs => self.jobs,
            Dimension::Ecosystem => self.ecosystem,
        }
    }

    pub fn set(&mut self, dimension: Dimension, score: Option<Score>) {
        let slot = match dimension {
            Dimension::CodeHosting => &mut self.code_hosting,
            Dimension::Community => &mut self.community,
            Dimension::Jobs => &mut self.jobs,
            Dimension::Ecosystem => &mut self.ecosystem,
        };
        *slot = score;
    }

    pub fn present(&self) -> impl Iterator<Item = (Dimension, Score)> + '_ {
        Dimension::ALL
            .into_iter()
            .filter_map(|dimension| self.get(dimension).map(|score| (dimension, score)))
    }

    pub fn present_count(&self) -> usize {
        self.present().count()
    }
}

/// Named dimension weights. The stored weights need not sum to 1; only the
/// weights of present dimensions are renormalized at aggregation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightProfile {
    pub name: String,
    pub code_hosting: f64,
    pub community: f64,
    pub jobs: f64,
    pub ecosystem: f64,
}

impl WeightProfile {
    pub const DEFAULT_NAME: &'static str = "default";

    pub fn new(
        name: impl Into<String>,
        code_hosting: f64,
        community: f64,
        jobs: f64,
        ecosystem: f64,
    ) -> Self {
        Self {
            name: name.into(),
            code_hosting,
            community,
            jobs,
            ecosystem,
        }
    }

    pub fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::CodeHosting => self.code_hosting,
            Dimension::Community => self.community,
            Dimension::Jobs => self.jobs,
            Dimension::Ecosystem => self.ecosystem,
        }
    }

    pub fn total(&self) -> f64 {
        Dimension::ALL
            .into_iter()
            .map(|dimension| self.weight(dimension))
            .sum()
    }
}

impl Default for WeightProfile {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAME, 0.30, 0.20, 0.25, 0.25)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    pub composite: Score,
    pub completeness: f64,
}

impl CompositeResult {
    pub const EMPTY: CompositeResult = CompositeResult {
        composite: 0.0,
        completeness: 0.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
    Emerging,
    Growing,
    Mature,
    Declining,
    Niche,
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Emerging => "emerging",
            Self::Growing => "growing",
            Self::Mature => "mature",
            Self::Declining => "declining",
            Self::Niche => "niche",
        };
        f.write_str(label)
    }
}

/// Auxiliary derived fields stored alongside the numeric scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub completeness: f64,
    pub confidence: f64,
    pub lifecycle: LifecycleStage,
}
