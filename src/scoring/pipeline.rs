use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

use crate::config::ScoringConfig;
use crate::scoring::{
    EngagementScorer, EngagementSignals, KeywordScorer, KeywordSignals, ViewsScorer,
};
use crate::VideoMetrics;

pub const DISPLAY_CAP: f64 = 100.0;
pub const PRECISE_CAP: f64 = 110.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub views_score: f64,
    pub engagement_score: f64,
    pub keyword_score: f64,
}

impl ScoreBreakdown {
    /// Uncapped sum of the three sub-scores.
    pub fn total(&self) -> f64 {
        self.views_score + self.engagement_score + self.keyword_score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopularityScore {
    pub display: u32,
    pub precise: f64,
}

impl PopularityScore {
    /// Display is floored so it never exceeds the precise value; precise keeps
    /// three decimals for tie-breaking.
    pub fn from_breakdown(breakdown: &ScoreBreakdown) -> Self {
        let total = breakdown.total();
        let total = if total.is_finite() { total.max(0.0) } else { 0.0 };

        let display = total.min(DISPLAY_CAP).floor() as u32;
        let precise = round3(total.min(PRECISE_CAP));
        Self { display, precise }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredVideo {
    pub breakdown: ScoreBreakdown,
    pub engagement: EngagementSignals,
    pub keywords: KeywordSignals,
    pub score: PopularityScore,
}

#[derive(Debug, Clone)]
pub struct ScoringPipeline {
    views_scorer: ViewsScorer,
    engagement_scorer: EngagementScorer,
    keyword_scorer: KeywordScorer,
}

impl ScoringPipeline {
    pub fn new(
        views_scorer: ViewsScorer,
        engagement_scorer: EngagementScorer,
        keyword_scorer: KeywordScorer,
    ) -> Self {
        Self {
            views_scorer,
            engagement_scorer,
            keyword_scorer,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(
            ViewsScorer::new(config.views.clone()),
            EngagementScorer::new(config.engagement.clone()),
            KeywordScorer::new(config.keywords.clone()),
        )
    }

    pub fn score(&self, metrics: &VideoMetrics) -> ScoredVideo {
        let views_score = self.views_scorer.score(metrics.view_count);
        let engagement = self.engagement_scorer.score(
            metrics.view_count,
            metrics.like_count,
            metrics.comment_count,
        );
        let keywords = self
            .keyword_scorer
            .score(&metrics.title, &metrics.description);

        let breakdown = ScoreBreakdown {
            views_score,
            engagement_score: engagement.score,
            keyword_score: keywords.score,
        };
        let score = PopularityScore::from_breakdown(&breakdown);

        debug!(
            views = metrics.view_count,
            views_score,
            engagement_score = engagement.score,
            keyword_score = keywords.score,
            precise = score.precise,
            "scored video"
        );

        ScoredVideo {
            breakdown,
            engagement,
            keywords,
            score,
        }
    }
}

/// Ranking order: precise score descending, then raw views descending, then
/// fingerprint ascending so equal records still sort deterministically.
pub fn rank_order(a: (f64, u64, u64), b: (f64, u64, u64)) -> Ordering {
    b.0.partial_cmp(&a.0)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.1.cmp(&a.1))
        .then_with(|| a.2.cmp(&b.2))
}

pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
