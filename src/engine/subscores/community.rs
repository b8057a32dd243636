use crate::engine::normalize::{clamp_score, round_to, CohortBaseline};
use crate::types::metrics::{Signal, SignalSet};

/// Sentiment adjustment spans [-15, +15] around a neutral 0.5 blend.
const SENTIMENT_SPAN: f64 = 30.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CommunityInputs {
    pub primary_mentions: Option<f64>,
    pub secondary_mentions: Option<f64>,
    pub article_volume: Option<f64>,
    pub news_mentions: Option<f64>,
    /// 0..=1, 0.5 is neutral.
    pub primary_sentiment: Option<f64>,
    /// 0..=1, 0.5 is neutral.
    pub secondary_sentiment: Option<f64>,
}

impl CommunityInputs {
    pub fn from_signals(signals: &SignalSet, baseline: &CohortBaseline) -> Self {
        let volume = |signal| {
            signals
                .get(signal)
                .map(|value| baseline.normalize(signal, value))
        };
        Self {
            primary_mentions: volume(Signal::ForumPrimaryMentions),
            secondary_mentions: volume(Signal::ForumSecondaryMentions),
            article_volume: volume(Signal::ArticleVolume),
            news_mentions: volume(Signal::NewsMentions),
            primary_sentiment: signals.get(Signal::ForumPrimarySentiment),
            secondary_sentiment: signals.get(Signal::ForumSecondarySentiment),
        }
    }

    pub fn blended_sentiment(&self) -> f64 {
        let primary = self.primary_sentiment.unwrap_or(0.5).clamp(0.0, 1.0);
        let secondary = self.secondary_sentiment.unwrap_or(0.5).clamp(0.0, 1.0);
        primary * 0.6 + secondary * 0.4
    }
}

pub fn community_score(inputs: &CommunityInputs) -> f64 {
    let mut score = 0.0;
    score += clamp_score(inputs.primary_mentions.unwrap_or(0.0)) * 0.30;
    score += clamp_score(inputs.secondary_mentions.unwrap_or(0.0)) * 0.20;
    score += clamp_score(inputs.article_volume.unwrap_or(0.0)) * 0.20;
    score += clamp_score(inputs.news_mentions.unwrap_or(0.0)) * 0.15;
    score += (inputs.blended_sentiment() - 0.5) * SENTIMENT_SPAN;
    round_to(clamp_score(score), 2)
}
