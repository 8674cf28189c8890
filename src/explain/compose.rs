use chrono::{DateTime, Utc};

use crate::config::ExplainConfig;
use crate::explain::{audience_appeal, detect_mentions, detect_segments, estimate_growth, summarize_mentions};
use crate::scoring::{EngagementBand, EngagementSignals, KeywordSignals, ScoredVideo};
use crate::taxonomy::KeywordCategory;
use crate::{format_compact, format_percent, VideoMetrics, ViewDetails};

const FALLBACK_OPENER: &str = "Popularity reflects";
const REASON_KEYWORD_EXAMPLES: usize = 3;

/// Builds the one to three sentence `reason` text.
pub fn compose_reason(
    metrics: &VideoMetrics,
    scored: &ScoredVideo,
    category: Option<&str>,
    config: &ExplainConfig,
) -> String {
    let opener = config
        .tiers
        .iter()
        .find(|tier| scored.score.display >= tier.min_score)
        .map(|tier| tier.opener.as_str())
        .unwrap_or(FALLBACK_OPENER);

    let reach = views_clause(metrics.view_count);
    let response = engagement_clause(&scored.engagement);
    let (first, second) = if scored.breakdown.views_score >= scored.breakdown.engagement_score {
        (reach, response)
    } else {
        (response, reach)
    };

    let mut sentences = vec![format!("{} {}, {}.", opener, first, second)];
    if let Some(sentence) = keyword_sentence(&scored.keywords) {
        sentences.push(sentence);
    }
    if let Some(name) = category {
        sentences.push(format!("Resonates within the {} category.", name));
    }
    sentences.join(" ")
}

fn views_clause(view_count: u64) -> String {
    let views = format_compact(view_count as f64);
    match view_count {
        0 => "no recorded views yet".to_string(),
        count if count >= 10_000_000 => format!("massive reach of {} views", views),
        count if count >= 1_000_000 => format!("strong reach of {} views", views),
        count if count >= 100_000 => format!("solid viewership of {} views", views),
        _ => format!("{} views so far", views),
    }
}

fn engagement_clause(engagement: &EngagementSignals) -> String {
    let like_rate = format_percent(engagement.like_ratio);
    match engagement.like_band {
        EngagementBand::Outstanding => format!("outstanding engagement ({} like rate)", like_rate),
        EngagementBand::Strong => format!("strong engagement ({} like rate)", like_rate),
        EngagementBand::Positive => format!("positive audience response ({} like rate)", like_rate),
        EngagementBand::Basic => format!("basic engagement ({} like rate)", like_rate),
        EngagementBand::None if engagement.comment_band > EngagementBand::None => format!(
            "comment activity ({} comment rate)",
            format_percent(engagement.comment_ratio)
        ),
        EngagementBand::None => "minimal audience interaction".to_string(),
    }
}

fn keyword_sentence(keywords: &KeywordSignals) -> Option<String> {
    if keywords.is_empty() {
        return None;
    }

    if keywords.has(KeywordCategory::ViralLive) {
        let terms = keywords.terms_for(KeywordCategory::ViralLive);
        return Some(format!(
            "Live/urgent signals ({}) add real-time urgency.",
            terms.join(", ")
        ));
    }

    let strongest = keywords
        .matches
        .iter()
        .max_by(|a, b| {
            a.base_points
                .partial_cmp(&b.base_points)
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
    let examples: Vec<&str> = keywords
        .matched_terms()
        .into_iter()
        .take(REASON_KEYWORD_EXAMPLES)
        .collect();
    Some(format!(
        "Trending {} keywords ({}) boost discoverability.",
        strongest.category.label(),
        examples.join(", ")
    ))
}

pub fn matched_keywords_summary(keywords: &KeywordSignals, max_examples: usize) -> String {
    let terms = keywords.matched_terms();
    if terms.is_empty() {
        return "No viral keywords detected".to_string();
    }
    let noun = if terms.len() == 1 { "keyword" } else { "keywords" };
    let examples: Vec<&str> = terms.iter().copied().take(max_examples.max(1)).collect();
    format!("{} {} ({})", terms.len(), noun, examples.join(", "))
}

/// Assembles all six view details. Every field always has a value.
pub fn view_details(
    metrics: &VideoMetrics,
    scored: &ScoredVideo,
    category: Option<&str>,
    now: DateTime<Utc>,
    config: &ExplainConfig,
) -> ViewDetails {
    let mentions = detect_mentions(&metrics.title, &metrics.description, &metrics.channel);
    let segments = detect_segments(&metrics.title, &metrics.description, category);

    ViewDetails {
        views: format!("{} views", format_compact(metrics.view_count as f64)),
        growth_rate: estimate_growth(
            metrics.view_count,
            metrics.published_at,
            now,
            config.viral_views_threshold,
        ),
        platform_mentions: summarize_mentions(&mentions),
        matched_keywords: matched_keywords_summary(&scored.keywords, config.max_keyword_examples),
        ai_opinion: audience_appeal(&segments, &scored.breakdown, config),
        score: format!("{}/100 (rule-based model)", scored.score.display),
    }
}
