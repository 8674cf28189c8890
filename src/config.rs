use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::taxonomy::KeywordCategory;

/// One point of a piecewise-linear scoring curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub at: f64,
    pub points: f64,
}

impl Breakpoint {
    pub const fn new(at: f64, points: f64) -> Self {
        Self { at, points }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Largest extra amount awarded past the final breakpoint.
    pub tail_bonus: f64,
    /// Views past the final breakpoint needed to earn ~63% of the tail bonus.
    pub tail_scale: f64,
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            tail_bonus: 1.5,
            tail_scale: 20_000_000.0,
            breakpoints: vec![
                Breakpoint::new(0.0, 0.0),
                Breakpoint::new(1_000.0, 6.111),
                Breakpoint::new(5_000.0, 12.222),
                Breakpoint::new(50_000.0, 18.333),
                Breakpoint::new(500_000.0, 24.444),
                Breakpoint::new(1_000_000.0, 27.5),
                Breakpoint::new(1_500_000.0, 30.5),
                Breakpoint::new(5_000_000.0, 32.5),
                Breakpoint::new(10_000_000.0, 33.5),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementConfig {
    pub cap: f64,
    /// Ratio points scale linearly up to full weight at this many views, so a
    /// handful of views cannot earn a top engagement band on its own.
    pub confidence_views: f64,
    /// Curve over likes / views.
    pub like_breakpoints: Vec<Breakpoint>,
    /// Curve over comments / views.
    pub comment_breakpoints: Vec<Breakpoint>,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            cap: 58.0,
            confidence_views: 1_000.0,
            like_breakpoints: vec![
                Breakpoint::new(0.0, 0.0),
                Breakpoint::new(0.015, 15.0),
                Breakpoint::new(0.03, 25.0),
                Breakpoint::new(0.05, 33.0),
                Breakpoint::new(0.10, 40.0),
            ],
            comment_breakpoints: vec![
                Breakpoint::new(0.0, 0.0),
                Breakpoint::new(0.001, 6.0),
                Breakpoint::new(0.002, 10.0),
                Breakpoint::new(0.005, 14.0),
                Breakpoint::new(0.01, 18.0),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    pub viral_live: f64,
    pub celebrity: f64,
    pub platform: f64,
    pub emotional: f64,
    pub exclusive: f64,
    /// Bonus per additional distinct term inside an already matched category.
    pub extra_term_bonus: f64,
    pub max_extra_terms: usize,
    /// Bonus per matched category beyond the first.
    pub diversity_bonus: f64,
    pub max_diversity_bonus: f64,
    /// Awarded once when any term starts inside the opening title window.
    pub position_bonus: f64,
    pub position_window: usize,
    pub cap: f64,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            viral_live: 6.0,
            celebrity: 4.0,
            platform: 3.0,
            emotional: 3.5,
            exclusive: 4.5,
            extra_term_bonus: 0.5,
            max_extra_terms: 3,
            diversity_bonus: 1.5,
            max_diversity_bonus: 4.5,
            position_bonus: 2.0,
            position_window: 20,
            cap: 22.0,
        }
    }
}

impl KeywordConfig {
    pub fn base_points(&self, category: KeywordCategory) -> f64 {
        match category {
            KeywordCategory::ViralLive => self.viral_live,
            KeywordCategory::Celebrity => self.celebrity,
            KeywordCategory::Platform => self.platform,
            KeywordCategory::Emotional => self.emotional,
            KeywordCategory::Exclusive => self.exclusive,
        }
    }
}

/// Opening phrase used once the display score reaches `min_score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonTier {
    pub min_score: u32,
    pub opener: String,
}

impl ReasonTier {
    fn new(min_score: u32, opener: &str) -> Self {
        Self {
            min_score,
            opener: opener.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplainConfig {
    /// View count separating "Viral growth pattern" from "Strong growth trend".
    pub viral_views_threshold: u64,
    pub highly_engaging_keyword_score: f64,
    pub highly_engaging_engagement_score: f64,
    pub max_keyword_examples: usize,
    /// Ordered from the highest threshold down; the last entry must be 0.
    pub tiers: Vec<ReasonTier>,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            viral_views_threshold: 1_000_000,
            highly_engaging_keyword_score: 10.0,
            highly_engaging_engagement_score: 30.0,
            max_keyword_examples: 5,
            tiers: vec![
                ReasonTier::new(80, "Viral performance driven by"),
                ReasonTier::new(60, "High popularity achieved through"),
                ReasonTier::new(40, "Moderate popularity from"),
                ReasonTier::new(20, "Emerging interest from"),
                ReasonTier::new(0, "Limited traction so far with"),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub views: ViewsConfig,
    pub engagement: EngagementConfig,
    pub keywords: KeywordConfig,
    pub explain: ExplainConfig,
}

impl ScoringConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                ScoringConfig::default()
            }
        } else {
            ScoringConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload)
            .map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    /// Rejects tables that would break the monotonic, bounded scoring curves.
    pub fn validate(&self) -> Result<(), String> {
        validate_curve("views.breakpoints", &self.views.breakpoints)?;
        validate_curve("engagement.like_breakpoints", &self.engagement.like_breakpoints)?;
        validate_curve(
            "engagement.comment_breakpoints",
            &self.engagement.comment_breakpoints,
        )?;

        let non_negative = [
            ("views.tail_bonus", self.views.tail_bonus),
            ("engagement.cap", self.engagement.cap),
            ("engagement.confidence_views", self.engagement.confidence_views),
            ("keywords.viral_live", self.keywords.viral_live),
            ("keywords.celebrity", self.keywords.celebrity),
            ("keywords.platform", self.keywords.platform),
            ("keywords.emotional", self.keywords.emotional),
            ("keywords.exclusive", self.keywords.exclusive),
            ("keywords.extra_term_bonus", self.keywords.extra_term_bonus),
            ("keywords.diversity_bonus", self.keywords.diversity_bonus),
            ("keywords.max_diversity_bonus", self.keywords.max_diversity_bonus),
            ("keywords.position_bonus", self.keywords.position_bonus),
            ("keywords.cap", self.keywords.cap),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number", name));
            }
        }
        if !self.views.tail_scale.is_finite() || self.views.tail_scale <= 0.0 {
            return Err("views.tail_scale must be positive".to_string());
        }

        let tiers = &self.explain.tiers;
        if tiers.is_empty() {
            return Err("explain.tiers must not be empty".to_string());
        }
        if tiers.windows(2).any(|pair| pair[0].min_score <= pair[1].min_score) {
            return Err("explain.tiers must be ordered by descending min_score".to_string());
        }
        if tiers.last().map(|tier| tier.min_score) != Some(0) {
            return Err("explain.tiers must end with a min_score of 0".to_string());
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(cap) = env::var("SCORING_ENGAGEMENT_CAP") {
            if let Ok(value) = cap.parse::<f64>() {
                self.engagement.cap = value;
            }
        }
        if let Ok(cap) = env::var("SCORING_KEYWORD_CAP") {
            if let Ok(value) = cap.parse::<f64>() {
                self.keywords.cap = value;
            }
        }
        if let Ok(threshold) = env::var("SCORING_VIRAL_VIEWS") {
            if let Ok(value) = threshold.parse::<u64>() {
                self.explain.viral_views_threshold = value;
            }
        }
    }
}

fn validate_curve(name: &str, curve: &[Breakpoint]) -> Result<(), String> {
    let first = curve
        .first()
        .ok_or_else(|| format!("{} must not be empty", name))?;
    if first.at != 0.0 || first.points != 0.0 {
        return Err(format!("{} must start at (0, 0)", name));
    }
    if curve
        .iter()
        .any(|point| !point.at.is_finite() || !point.points.is_finite())
    {
        return Err(format!("{} contains a non-finite value", name));
    }
    let monotonic = curve
        .windows(2)
        .all(|pair| pair[0].at < pair[1].at && pair[0].points <= pair[1].points);
    if !monotonic {
        return Err(format!("{} must be strictly increasing in `at` and non-decreasing in `points`", name));
    }
    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    env::var("SCORING_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/scoring.toml")))
}
