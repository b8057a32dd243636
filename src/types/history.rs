use crate::types::scoring::{Dimension, Score, SubScores};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One previously computed score row for a technology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub date: NaiveDate,
    pub composite: Score,
    #[serde(default)]
    pub code_hosting: Option<Score>,
    #[serde(default)]
    pub community: Option<Score>,
    #[serde(default)]
    pub jobs: Option<Score>,
    #[serde(default)]
    pub ecosystem: Option<Score>,
}

impl ScoreRow {
    pub fn new(date: NaiveDate, composite: Score, sub_scores: SubScores) -> Self {
        Self {
            date,
            composite,
            code_hosting: sub_scores.code_hosting,
            community: sub_scores.community,
            jobs: sub_scores.jobs,
            ecosystem: sub_scores.ecosystem,
        }
    }

    pub fn sub_scores(&self) -> SubScores {
        SubScores {
            code_hosting: self.code_hosting,
            community: self.community,
            jobs: self.jobs,
            ecosystem: self.ecosystem,
        }
    }

    pub fn value(&self, metric: SeriesMetric) -> Option<Score> {
        match metric {
            SeriesMetric::Composite => Some(self.composite),
            SeriesMetric::Dimension(dimension) => self.sub_scores().get(dimension),
        }
    }

    pub fn point(&self) -> ScorePoint {
        ScorePoint {
            date: self.date,
            score: self.composite,
        }
    }
}

/// A `{date, score}` pair fed to the momentum analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub date: NaiveDate,
    pub score: Score,
}

/// Which per-row series an anomaly check reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesMetric {
    Composite,
    Dimension(Dimension),
}

impl SeriesMetric {
    pub fn source(self) -> &'static str {
        match self {
            Self::Composite => "composite",
            Self::Dimension(dimension) => dimension.as_str(),
        }
    }
}

/// Chronological score rows for one technology. Rows are kept sorted by date
/// and one row per date; a later row for an existing date replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreHistory {
    rows: Vec<ScoreRow>,
}

impl ScoreHistory {
    pub fn from_rows(rows: impl IntoIterator<Item = ScoreRow>) -> Self {
        let mut history = Self::default();
        for row in rows {
            history.upsert(row);
        }
        history
    }

    pub fn upsert(&mut self, row: ScoreRow) {
        match self.rows.binary_search_by(|existing| existing.date.cmp(&row.date)) {
            Ok(index) => self.rows[index] = row,
            Err(index) => self.rows.insert(index, row),
        }
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    /// Rows strictly before `date`.
    pub fn before(&self, date: NaiveDate) -> &[ScoreRow] {
        let end = self.rows.partition_point(|row| row.date < date);
        &self.rows[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).expect("valid date")
    }

    fn row(d: u32, composite: f64) -> ScoreRow {
        ScoreRow::new(day(d), composite, SubScores::default())
    }

    #[test]
    fn from_rows_sorts_and_replaces_same_date() {
        let history = ScoreHistory::from_rows([row(3, 30.0), row(1, 10.0), row(3, 33.0)]);
        let composites = history
            .rows()
            .iter()
            .map(|row| row.composite)
            .collect::<Vec<_>>();
        assert_eq!(composites, vec![10.0, 33.0]);
    }

    #[test]
    fn before_excludes_the_given_date() {
        let history = ScoreHistory::from_rows([row(1, 1.0), row(2, 2.0), row(3, 3.0)]);
        assert_eq!(history.before(day(3)).len(), 2);
        assert_eq!(history.before(day(1)).len(), 0);
    }
}
