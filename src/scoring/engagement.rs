use serde::Serialize;

use crate::config::EngagementConfig;
use crate::scoring::interpolate;

/// Band cutoffs shared by the like and comment ratios. Any ratio above zero
/// is at least `Basic`.
const RATIO_BANDS: [(f64, EngagementBand); 3] = [
    (0.05, EngagementBand::Outstanding),
    (0.03, EngagementBand::Strong),
    (0.015, EngagementBand::Positive),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum EngagementBand {
    None,
    Basic,
    Positive,
    Strong,
    Outstanding,
}

impl EngagementBand {
    pub fn label(self) -> &'static str {
        match self {
            EngagementBand::None => "none",
            EngagementBand::Basic => "basic",
            EngagementBand::Positive => "positive",
            EngagementBand::Strong => "strong",
            EngagementBand::Outstanding => "outstanding",
        }
    }

    fn classify(ratio: f64, bands: &[(f64, EngagementBand)]) -> Self {
        if ratio.is_nan() || ratio <= 0.0 {
            return EngagementBand::None;
        }
        bands
            .iter()
            .find(|(threshold, _)| ratio >= *threshold)
            .map(|(_, band)| *band)
            .unwrap_or(EngagementBand::Basic)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementSignals {
    pub like_ratio: f64,
    pub comment_ratio: f64,
    pub like_band: EngagementBand,
    pub comment_band: EngagementBand,
    pub like_points: f64,
    pub comment_points: f64,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct EngagementScorer {
    config: EngagementConfig,
}

impl EngagementScorer {
    pub fn new(config: EngagementConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, views: u64, likes: u64, comments: u64) -> EngagementSignals {
        let like_ratio = ratio(likes, views);
        let comment_ratio = ratio(comments, views);

        let confidence = self.confidence(views);
        let like_points = interpolate(&self.config.like_breakpoints, like_ratio) * confidence;
        let comment_points =
            interpolate(&self.config.comment_breakpoints, comment_ratio) * confidence;
        let score = (like_points + comment_points).min(self.config.cap).max(0.0);

        EngagementSignals {
            like_ratio,
            comment_ratio,
            like_band: EngagementBand::classify(like_ratio, &RATIO_BANDS),
            comment_band: EngagementBand::classify(comment_ratio, &RATIO_BANDS),
            like_points,
            comment_points,
            score,
        }
    }

    fn confidence(&self, views: u64) -> f64 {
        if self.config.confidence_views <= 0.0 {
            return 1.0;
        }
        (views as f64 / self.config.confidence_views).min(1.0)
    }
}

fn ratio(count: u64, views: u64) -> f64 {
    if views == 0 {
        return 0.0;
    }
    count as f64 / views as f64
}
