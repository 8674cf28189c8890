use chrono::{DateTime, Utc};

use crate::format_compact;

const HOURS_PER_DAY: f64 = 24.0;
const DAYS_PER_WEEK: f64 = 7.0;

/// Describes how fast a video is accumulating views.
///
/// Age is measured against `now`; a publish time in the future counts as zero
/// age. Extrapolation inside the first day assumes at least one elapsed hour
/// so a freshly published video does not project an absurd figure.
pub fn estimate_growth(
    view_count: u64,
    published_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    viral_views_threshold: u64,
) -> String {
    let published_at = match published_at {
        Some(published_at) => published_at,
        None => return qualitative_growth(view_count, viral_views_threshold),
    };

    let age_seconds = (now - published_at).num_seconds().max(0) as f64;
    let age_hours = age_seconds / 3600.0;
    let views = view_count as f64;

    if age_hours <= HOURS_PER_DAY {
        let elapsed = age_hours.max(1.0);
        let projected = views * HOURS_PER_DAY / elapsed;
        return format!("+{} estimated in 24hr", format_compact(projected));
    }

    let age_days = age_hours / HOURS_PER_DAY;
    if age_days <= DAYS_PER_WEEK {
        return format!("~{} avg/day", format_compact(views / age_days));
    }

    let age_weeks = age_days / DAYS_PER_WEEK;
    format!("~{} avg/week", format_compact(views / age_weeks))
}

fn qualitative_growth(view_count: u64, viral_views_threshold: u64) -> String {
    if view_count >= viral_views_threshold {
        "Viral growth pattern".to_string()
    } else {
        "Strong growth trend".to_string()
    }
}
