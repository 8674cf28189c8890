pub mod config;
pub mod error;
pub mod explain;
pub mod normalize;
pub mod scoring;
pub mod taxonomy;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

pub use crate::config::ScoringConfig;
pub use crate::error::InputError;

use crate::explain::{compose_reason, view_details};
use crate::normalize::parse_count;
use crate::scoring::pipeline::rank_order;
use crate::scoring::ScoringPipeline;
use crate::taxonomy::category_name;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetrics {
    pub title: String,
    pub description: String,
    pub channel: String,
    pub category: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub published_at: Option<DateTime<Utc>>,
}

/// The "why this score" panel. `ai_opinion` keeps its historical name but is
/// filled by keyword rules, never by a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDetails {
    pub views: String,
    pub growth_rate: String,
    pub platform_mentions: String,
    pub matched_keywords: String,
    pub ai_opinion: String,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub popularity_score: u32,
    pub popularity_score_precise: f64,
    pub reason: String,
    pub view_details: ViewDetails,
}

pub fn analyze(metrics: &VideoMetrics) -> ScoreResult {
    analyze_with_config(metrics, &ScoringConfig::default(), Utc::now())
}

/// Scores and explains one video against an explicit clock. Pure: the same
/// inputs always produce the same result.
pub fn analyze_with_config(
    metrics: &VideoMetrics,
    config: &ScoringConfig,
    now: DateTime<Utc>,
) -> ScoreResult {
    let pipeline = ScoringPipeline::from_config(config);
    let scored = pipeline.score(metrics);
    let category = category_name(&metrics.category);

    let reason = compose_reason(metrics, &scored, category.as_deref(), &config.explain);
    let view_details = view_details(metrics, &scored, category.as_deref(), now, &config.explain);

    ScoreResult {
        popularity_score: scored.score.display,
        popularity_score_precise: scored.score.precise,
        reason,
        view_details,
    }
}

/// Returns `record` with the four score fields added. Unrelated keys are left
/// as they were; existing score fields are overwritten.
pub fn augment_record(
    record: &Value,
    config: &ScoringConfig,
    now: DateTime<Utc>,
) -> Result<Value, InputError> {
    let metrics = VideoMetrics::from_record(record)?;
    let result = analyze_with_config(&metrics, config, now);

    let mut augmented = record.clone();
    if let Value::Object(map) = &mut augmented {
        let details = &result.view_details;
        map.insert("popularity_score".to_string(), json!(result.popularity_score));
        map.insert(
            "popularity_score_precise".to_string(),
            json!(result.popularity_score_precise),
        );
        map.insert("reason".to_string(), json!(result.reason));
        map.insert(
            "view_details".to_string(),
            json!({
                "views": details.views,
                "growth_rate": details.growth_rate,
                "platform_mentions": details.platform_mentions,
                "matched_keywords": details.matched_keywords,
                "ai_opinion": details.ai_opinion,
                "score": details.score,
            }),
        );
    }
    Ok(augmented)
}

/// Augments and ranks a batch. Entries that are not records are logged and
/// dropped; the rest are ordered best first.
pub fn rank_records(records: Vec<Value>, config: &ScoringConfig, now: DateTime<Utc>) -> Vec<Value> {
    let augmented: Vec<Value> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match augment_record(record, config, now) {
            Ok(augmented) => Some(augmented),
            Err(err) => {
                warn!(index, error = %err, "skipping record");
                None
            }
        })
        .collect();
    rank_augmented(augmented)
}

/// Sorts already augmented records by precise score, then raw views, then a
/// stable title/channel fingerprint.
pub fn rank_augmented(records: Vec<Value>) -> Vec<Value> {
    let mut keyed: Vec<((f64, u64, u64), Value)> = records
        .into_iter()
        .map(|record| (rank_key(&record), record))
        .collect();
    keyed.sort_by(|a, b| rank_order(a.0, b.0));
    keyed.into_iter().map(|(_, record)| record).collect()
}

fn rank_key(record: &Value) -> (f64, u64, u64) {
    let precise = record
        .get("popularity_score_precise")
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    let views = parse_count(record.get("view_count"));
    let fingerprint = stable_hash64(&format!(
        "{}\u{1f}{}",
        str_field(record, "title"),
        str_field(record, "channel")
    ));
    (precise, views, fingerprint)
}

fn str_field<'a>(record: &'a Value, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Formats a count with a K/M/B suffix and one decimal, dropping a trailing
/// ".0" ("2.6M", "15K", "999").
pub fn format_compact(value: f64) -> String {
    const UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

    let value = if value.is_finite() { value.max(0.0).round() } else { 0.0 };
    for (index, (scale, suffix)) in UNITS.iter().enumerate() {
        if value < *scale {
            continue;
        }
        let scaled = round1(value / scale);
        // 999_960 would otherwise print as "1000K".
        if scaled >= 1000.0 && index > 0 {
            let (larger, larger_suffix) = UNITS[index - 1];
            return trim_decimal(round1(value / larger), larger_suffix);
        }
        return trim_decimal(scaled, suffix);
    }
    format!("{}", value as u64)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn trim_decimal(scaled: f64, suffix: &str) -> String {
    if scaled.fract() == 0.0 {
        format!("{}{}", scaled as u64, suffix)
    } else {
        format!("{:.1}{}", scaled, suffix)
    }
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
