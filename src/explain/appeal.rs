//! Audience appeal for the `ai_opinion` view detail.
//!
//! The field name is historical: the sentence is produced purely by matching
//! the static audience keyword lists below. No model is consulted.

use crate::config::ExplainConfig;
use crate::scoring::ScoreBreakdown;
use crate::taxonomy::{contains_term, AudienceSegment};

const MAX_CLAUSES: usize = 3;
const FALLBACK_AUDIENCE: &str = "a broad general audience";

/// Segments indicated by the text, plus the one implied by the category.
/// Returned in taxonomy order without duplicates.
pub fn detect_segments(title: &str, description: &str, category: Option<&str>) -> Vec<AudienceSegment> {
    let haystack = format!("{} {}", title, description).to_lowercase();
    let from_category = category.and_then(AudienceSegment::from_category);

    AudienceSegment::ALL
        .iter()
        .copied()
        .filter(|segment| {
            Some(*segment) == from_category
                || segment.terms().iter().any(|term| contains_term(&haystack, term))
        })
        .collect()
}

pub fn audience_appeal(
    segments: &[AudienceSegment],
    breakdown: &ScoreBreakdown,
    config: &ExplainConfig,
) -> String {
    let clauses: Vec<&str> = segments
        .iter()
        .take(MAX_CLAUSES)
        .map(|segment| segment.clause())
        .collect();
    let audience = if clauses.is_empty() {
        FALLBACK_AUDIENCE.to_string()
    } else {
        join_clauses(&clauses)
    };

    let highly_engaging = breakdown.keyword_score >= config.highly_engaging_keyword_score
        || breakdown.engagement_score >= config.highly_engaging_engagement_score;
    let characterization = if highly_engaging {
        "highly engaging content"
    } else {
        "engaging storytelling"
    };

    format!("Likely appeals to {} due to {}.", audience, characterization)
}

fn join_clauses(clauses: &[&str]) -> String {
    match clauses {
        [] => String::new(),
        [only] => (*only).to_string(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}
