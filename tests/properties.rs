use chrono::{DateTime, TimeZone, Utc};
use popularity_engine::scoring::ScoringPipeline;
use popularity_engine::{analyze_with_config, augment_record, ScoringConfig, VideoMetrics};
use serde_json::json;

const VIEW_LADDER: [u64; 22] = [
    0,
    1,
    10,
    999,
    1_000,
    1_001,
    4_999,
    5_000,
    5_001,
    49_999,
    50_000,
    250_000,
    499_999,
    500_000,
    500_001,
    1_499_999,
    1_500_000,
    2_600_000,
    9_999_999,
    10_000_000,
    250_000_000,
    u64::MAX,
];

fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap()
}

fn metrics(views: u64, likes: u64, comments: u64, title: &str) -> VideoMetrics {
    VideoMetrics {
        title: title.to_string(),
        view_count: views,
        like_count: likes,
        comment_count: comments,
        ..VideoMetrics::default()
    }
}

#[test]
fn views_score_never_decreases_with_views() {
    let pipeline = ScoringPipeline::from_config(&ScoringConfig::default());
    let mut previous = f64::MIN;
    for views in VIEW_LADDER {
        let score = pipeline.score(&metrics(views, 0, 0, "")).breakdown.views_score;
        assert!(score >= previous, "views_score dropped at {} views", views);
        previous = score;
    }
}

// Engagement is scored on likes/views and comments/views, so holding raw
// like and comment counts fixed while views grow lowers the ratios and can
// lower the precise score. Monotonicity of the precise score is therefore
// checked only with no likes or comments, or with the ratios held constant.
#[test]
fn precise_score_never_decreases_with_views_for_fixed_keywords() {
    let config = ScoringConfig::default();
    let mut previous = f64::MIN;
    for views in VIEW_LADDER {
        let input = metrics(views, 0, 0, "Exclusive premiere");
        let result = analyze_with_config(&input, &config, reference_now());
        assert!(
            result.popularity_score_precise >= previous,
            "precise score dropped at {} views",
            views
        );
        previous = result.popularity_score_precise;
    }
}

#[test]
fn precise_score_never_decreases_with_views_at_fixed_ratios() {
    let config = ScoringConfig::default();
    let mut previous = f64::MIN;
    let ladder = [
        0,
        400,
        800,
        4_000,
        40_000,
        400_000,
        1_200_000,
        4_000_000,
        40_000_000,
        400_000_000,
    ];
    for views in ladder {
        let likes = views / 40;
        let comments = views / 400;
        let input = metrics(views, likes, comments, "");
        let result = analyze_with_config(&input, &config, reference_now());
        assert!(
            result.popularity_score_precise + 1e-9 >= previous,
            "precise score dropped at {} views",
            views
        );
        previous = result.popularity_score_precise;
    }
}

#[test]
fn scores_stay_within_bounds() {
    let config = ScoringConfig::default();
    let titles = ["", "🔴 LIVE breaking viral celebrity tiktok shocking exclusive official"];
    let counts = [0, 1, 7_500, 3_000_000, u64::MAX];

    for title in titles {
        for views in counts {
            for likes in counts {
                for comments in counts {
                    let result = analyze_with_config(
                        &metrics(views, likes, comments, title),
                        &config,
                        reference_now(),
                    );
                    assert!(result.popularity_score <= 100);
                    assert!(result.popularity_score as f64 <= result.popularity_score_precise);
                    assert!(result.popularity_score_precise <= 110.0);
                    assert!(result.popularity_score_precise >= 0.0);
                }
            }
        }
    }
}

#[test]
fn maxed_out_video_hits_both_caps() {
    let result = analyze_with_config(
        &metrics(
            u64::MAX,
            u64::MAX,
            u64::MAX,
            "🔴 LIVE breaking viral: celebrity star tiktok challenge shocking insane exclusive official",
        ),
        &ScoringConfig::default(),
        reference_now(),
    );

    assert_eq!(result.popularity_score, 100);
    assert!((result.popularity_score_precise - 110.0).abs() < 1e-9);
    assert!(result.reason.starts_with("Viral performance driven by"));
}

#[test]
fn identical_input_yields_identical_output() {
    let config = ScoringConfig::default();
    let input = VideoMetrics {
        title: "Official MV | KBS live stage".to_string(),
        description: "Fans on TikTok went wild".to_string(),
        channel: "Label Music".to_string(),
        category: "10".to_string(),
        view_count: 3_456_789,
        like_count: 123_456,
        comment_count: 7_890,
        published_at: Some(Utc.with_ymd_and_hms(2024, 4, 28, 9, 30, 0).unwrap()),
    };

    let first = analyze_with_config(&input, &config, reference_now());
    let second = analyze_with_config(&input, &config, reference_now());

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn missing_counts_produce_empty_but_complete_result() {
    let metrics = VideoMetrics::from_record(&json!({})).unwrap();
    let result = analyze_with_config(&metrics, &ScoringConfig::default(), reference_now());

    assert_eq!(result.popularity_score, 0);
    assert_eq!(result.popularity_score_precise, 0.0);
    assert!(!result.reason.is_empty());
    assert_eq!(result.view_details.views, "0 views");
    assert_eq!(result.view_details.growth_rate, "Strong growth trend");
    assert_eq!(result.view_details.platform_mentions, "Primary platform only");
    assert_eq!(result.view_details.matched_keywords, "No viral keywords detected");
    assert!(!result.view_details.ai_opinion.is_empty());
    assert_eq!(result.view_details.score, "0/100 (rule-based model)");
}

#[test]
fn garbage_records_still_produce_every_view_detail() {
    let records = [
        json!({ "view_count": "n/a", "like_count": "??", "comment_count": -12 }),
        json!({ "title": null, "description": [], "published_at": "soon" }),
        json!({ "title": "", "view_count": 1e30, "published_at": -5 }),
        json!({ "category": 17, "channel": {}, "like_count": "9,9,9" }),
    ];

    for record in records {
        let augmented = augment_record(&record, &ScoringConfig::default(), reference_now()).unwrap();
        let details = augmented["view_details"].as_object().unwrap();
        assert_eq!(details.len(), 6);
        for (key, value) in details {
            let text = value.as_str().unwrap_or_default();
            assert!(!text.is_empty(), "{} is empty for {}", key, record);
        }
        assert!(!augmented["reason"].as_str().unwrap_or_default().is_empty());
    }
}
