use popularity_engine::config::{EngagementConfig, KeywordConfig, ScoringConfig, ViewsConfig};
use popularity_engine::scoring::pipeline::rank_order;
use popularity_engine::scoring::{
    EngagementBand, EngagementScorer, KeywordScorer, PopularityScore, ScoreBreakdown,
    ScoringPipeline, ViewsScorer,
};
use popularity_engine::taxonomy::KeywordCategory;
use popularity_engine::VideoMetrics;
use std::cmp::Ordering;

fn views_scorer() -> ViewsScorer {
    ViewsScorer::new(ViewsConfig::default())
}

fn keyword_scorer() -> KeywordScorer {
    KeywordScorer::new(KeywordConfig::default())
}

#[test]
fn views_score_is_zero_without_views() {
    assert_eq!(views_scorer().score(0), 0.0);
}

#[test]
fn views_score_hits_documented_breakpoints() {
    let scorer = views_scorer();
    assert!((scorer.score(5_000) - 12.222).abs() < 1e-3);
    assert!((scorer.score(500_000) - 24.444).abs() < 1e-3);
    assert!((scorer.score(1_500_000) - 30.5).abs() < 1e-3);
}

#[test]
fn views_score_interpolates_between_breakpoints() {
    let scorer = views_scorer();
    let midpoint = (24.444 + 27.5) / 2.0;
    assert!((scorer.score(750_000) - midpoint).abs() < 1e-6);

    let expected = 30.5 + (1_100_000.0 / 3_500_000.0) * 2.0;
    assert!((scorer.score(2_600_000) - expected).abs() < 1e-6);
}

#[test]
fn views_score_tail_is_bounded() {
    let scorer = views_scorer();
    let at_last = scorer.score(10_000_000);
    let beyond = scorer.score(40_000_000);
    let extreme = scorer.score(u64::MAX);

    assert!((at_last - 33.5).abs() < 1e-6);
    assert!(beyond > at_last);
    assert!(extreme >= beyond);
    assert!(extreme <= scorer.ceiling() + 1e-9);
    assert!((scorer.ceiling() - 35.0).abs() < 1e-9);
}

#[test]
fn views_score_does_not_jump_around_breakpoints() {
    let scorer = views_scorer();
    let below = scorer.score(4_999);
    let at = scorer.score(5_000);
    let above = scorer.score(5_001);

    assert!(below <= at && at <= above);
    assert!(at - below < 0.01);
    assert!(above - at < 0.01);
}

#[test]
fn engagement_handles_zero_views() {
    let scorer = EngagementScorer::new(EngagementConfig::default());
    let signals = scorer.score(0, 500, 20);

    assert_eq!(signals.like_ratio, 0.0);
    assert_eq!(signals.comment_ratio, 0.0);
    assert_eq!(signals.like_band, EngagementBand::None);
    assert_eq!(signals.comment_band, EngagementBand::None);
    assert_eq!(signals.score, 0.0);
}

#[test]
fn engagement_bands_follow_like_ratio_thresholds() {
    let scorer = EngagementScorer::new(EngagementConfig::default());
    let band = |likes: u64| scorer.score(100_000, likes, 0).like_band;

    assert_eq!(band(0), EngagementBand::None);
    assert_eq!(band(1_000), EngagementBand::Basic);
    assert_eq!(band(1_500), EngagementBand::Positive);
    assert_eq!(band(3_000), EngagementBand::Strong);
    assert_eq!(band(5_000), EngagementBand::Outstanding);
}

#[test]
fn engagement_for_one_percent_likes_is_basic() {
    let scorer = EngagementScorer::new(EngagementConfig::default());
    let signals = scorer.score(5_000_000, 50_000, 10_000);

    assert_eq!(signals.like_band, EngagementBand::Basic);
    assert_eq!(signals.comment_band, EngagementBand::Basic);
    assert!((signals.like_points - 10.0).abs() < 1e-6);
    assert!((signals.comment_points - 10.0).abs() < 1e-6);
    assert!((signals.score - 20.0).abs() < 1e-6);
    assert!(signals.score < 15.0 + 18.0);
}

#[test]
fn comment_ratio_uses_the_like_ratio_bands() {
    let scorer = EngagementScorer::new(EngagementConfig::default());
    let band = |comments: u64| scorer.score(100_000, 0, comments).comment_band;

    assert_eq!(band(0), EngagementBand::None);
    assert_eq!(band(200), EngagementBand::Basic);
    assert_eq!(band(1_000), EngagementBand::Basic);
    assert_eq!(band(1_500), EngagementBand::Positive);
    assert_eq!(band(3_000), EngagementBand::Strong);
    assert_eq!(band(5_000), EngagementBand::Outstanding);
}

#[test]
fn engagement_is_capped() {
    let scorer = EngagementScorer::new(EngagementConfig::default());
    let signals = scorer.score(10_000, 10_000, 10_000);

    assert!((signals.like_points - 40.0).abs() < 1e-6);
    assert!((signals.comment_points - 18.0).abs() < 1e-6);
    assert!((signals.score - 58.0).abs() < 1e-6);
}

#[test]
fn engagement_scales_down_tiny_samples() {
    let scorer = EngagementScorer::new(EngagementConfig::default());
    let tiny = scorer.score(500, 50, 0);
    let full = scorer.score(5_000, 500, 0);

    assert_eq!(tiny.like_band, EngagementBand::Outstanding);
    assert!((tiny.like_points - 20.0).abs() < 1e-6);
    assert!((full.like_points - 40.0).abs() < 1e-6);
}

#[test]
fn keyword_scorer_rewards_live_terms_with_position_bonus() {
    let signals = keyword_scorer().score("🔴 LIVE now", "");

    assert_eq!(signals.terms_for(KeywordCategory::ViralLive), &["🔴", "live"]);
    assert!((signals.position_bonus - 2.0).abs() < 1e-9);
    assert!((signals.score - 8.5).abs() < 1e-9);
}

#[test]
fn keyword_scorer_ignores_repetition() {
    let scorer = keyword_scorer();
    let once = scorer.score("live", "");
    let repeated = scorer.score("live live live live", "live again, live");

    assert_eq!(once.score, repeated.score);
    assert_eq!(repeated.matched_terms(), vec!["live"]);
}

#[test]
fn keyword_scorer_awards_diversity_bonus() {
    let signals = keyword_scorer().score("Exclusive: celebrity reacts", "");

    assert!(signals.has(KeywordCategory::Exclusive));
    assert!(signals.has(KeywordCategory::Celebrity));
    assert!((signals.diversity_bonus - 1.5).abs() < 1e-9);
    assert!((signals.score - 12.0).abs() < 1e-9);
}

#[test]
fn keyword_scorer_only_gives_position_bonus_early_in_title() {
    let scorer = keyword_scorer();
    let from_description = scorer.score("Daily vlog", "this is live");
    let late_in_title = scorer.score("A very long intro text then live", "");

    assert!((from_description.score - 6.0).abs() < 1e-9);
    assert!((late_in_title.score - 6.0).abs() < 1e-9);
}

#[test]
fn keyword_scorer_respects_word_boundaries() {
    let signals = keyword_scorer().score("Olive oil delivery", "startrek");

    assert!(signals.is_empty());
    assert_eq!(signals.score, 0.0);
}

#[test]
fn keyword_score_is_capped() {
    let signals = keyword_scorer().score(
        "🔴 LIVE breaking viral trending: celebrity star idol tiktok challenge meme",
        "shocking amazing insane exclusive official premiere",
    );

    assert_eq!(signals.matches.len(), 5);
    assert!((signals.score - 22.0).abs() < 1e-9);
}

#[test]
fn popularity_score_caps_display_and_precise() {
    let breakdown = ScoreBreakdown {
        views_score: 35.0,
        engagement_score: 58.0,
        keyword_score: 22.0,
    };
    let score = PopularityScore::from_breakdown(&breakdown);

    assert_eq!(score.display, 100);
    assert!((score.precise - 110.0).abs() < 1e-9);
}

#[test]
fn popularity_score_floors_display() {
    let breakdown = ScoreBreakdown {
        views_score: 30.5,
        engagement_score: 20.0,
        keyword_score: 8.9996,
    };
    let score = PopularityScore::from_breakdown(&breakdown);

    assert_eq!(score.display, 59);
    assert!((score.precise - 59.5).abs() < 1e-9);
}

#[test]
fn popularity_score_treats_nan_as_zero() {
    let breakdown = ScoreBreakdown {
        views_score: f64::NAN,
        engagement_score: 0.0,
        keyword_score: 0.0,
    };
    let score = PopularityScore::from_breakdown(&breakdown);

    assert_eq!(score.display, 0);
    assert_eq!(score.precise, 0.0);
}

#[test]
fn scoring_pipeline_sums_sub_scores() {
    let pipeline = ScoringPipeline::from_config(&ScoringConfig::default());
    let metrics = VideoMetrics {
        title: "🔴 LIVE now".to_string(),
        view_count: 1_500_000,
        ..VideoMetrics::default()
    };

    let scored = pipeline.score(&metrics);

    assert!((scored.breakdown.views_score - 30.5).abs() < 1e-6);
    assert_eq!(scored.breakdown.engagement_score, 0.0);
    assert!((scored.breakdown.keyword_score - 8.5).abs() < 1e-9);
    assert!((scored.score.precise - 39.0).abs() < 1e-9);
    assert_eq!(scored.score.display, 39);
}

#[test]
fn rank_order_breaks_ties_on_views_then_fingerprint() {
    assert_eq!(rank_order((60.0, 10, 0), (50.0, 99, 0)), Ordering::Less);
    assert_eq!(rank_order((50.0, 10, 1), (50.0, 20, 0)), Ordering::Greater);
    assert_eq!(rank_order((50.0, 20, 1), (50.0, 20, 2)), Ordering::Less);
}
