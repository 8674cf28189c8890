pub mod engagement;
pub mod keywords;
pub mod pipeline;
pub mod views;

pub use engagement::{EngagementBand, EngagementScorer, EngagementSignals};
pub use keywords::{KeywordMatch, KeywordScorer, KeywordSignals};
pub use pipeline::{PopularityScore, ScoreBreakdown, ScoredVideo, ScoringPipeline};
pub use views::ViewsScorer;

use crate::config::Breakpoint;

/// Linear interpolation over a validated, increasing curve. Inputs past the
/// final breakpoint hold its value.
pub(crate) fn interpolate(curve: &[Breakpoint], x: f64) -> f64 {
    let first = match curve.first() {
        Some(first) => first,
        None => return 0.0,
    };
    if x.is_nan() || x <= first.at {
        return first.points;
    }

    for pair in curve.windows(2) {
        let (low, high) = (pair[0], pair[1]);
        if x <= high.at {
            let span = high.at - low.at;
            if span <= 0.0 {
                return high.points;
            }
            let t = (x - low.at) / span;
            return low.points + (high.points - low.points) * t;
        }
    }

    curve.last().map(|last| last.points).unwrap_or(0.0)
}
