use crate::config::ViewsConfig;
use crate::scoring::interpolate;

/// Scores raw reach on an interpolated curve with a saturating tail, so the
/// score never decreases as views grow and never grows without bound.
#[derive(Debug, Clone)]
pub struct ViewsScorer {
    config: ViewsConfig,
}

impl ViewsScorer {
    pub fn new(config: ViewsConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, view_count: u64) -> f64 {
        let views = view_count as f64;
        let last = match self.config.breakpoints.last() {
            Some(last) => *last,
            None => return 0.0,
        };

        if views <= last.at {
            return interpolate(&self.config.breakpoints, views);
        }

        let overflow = (views - last.at) / self.config.tail_scale;
        last.points + self.config.tail_bonus * (1.0 - (-overflow).exp())
    }

    /// Upper bound of the curve, reached only asymptotically.
    pub fn ceiling(&self) -> f64 {
        let last = self
            .config
            .breakpoints
            .last()
            .map(|point| point.points)
            .unwrap_or(0.0);
        last + self.config.tail_bonus
    }
}
