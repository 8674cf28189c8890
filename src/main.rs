use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use popularity_engine::normalize::{parse_count_str, parse_timestamp_str};
use popularity_engine::scoring::ScoringPipeline;
use popularity_engine::{
    analyze_with_config, augment_record, format_float, format_number, format_percent,
    rank_augmented, ScoringConfig, VideoMetrics,
};
use serde_json::Value;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "popularity-engine", about = "Rule-based popularity scoring for trending videos")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score and rank a batch of video records (JSON array or JSON lines).
    Score(ScoreArgs),
    /// Explain the score of a single video.
    Explain(ExplainArgs),
    /// Write the default scoring configuration.
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct ScoreArgs {
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Reference time for growth estimates (RFC 3339); defaults to now.
    #[arg(long)]
    now: Option<String>,
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug, Clone)]
struct ExplainArgs {
    #[arg(long, default_value = "")]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value = "")]
    channel: String,
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value = "0")]
    views: String,
    #[arg(long, default_value = "0")]
    likes: String,
    #[arg(long, default_value = "0")]
    comments: String,
    #[arg(long)]
    published_at: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    now: Option<String>,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/scoring.toml")]
    path: PathBuf,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Score(args) => run_score(args).await,
        Command::Explain(args) => run_explain(args),
        Command::InitConfig(args) => run_init_config(args),
    }
}

async fn run_score(args: ScoreArgs) -> Result<(), String> {
    let (config, config_path) = ScoringConfig::load(args.config)?;
    if let Some(path) = config_path.filter(|path| path.exists()) {
        info!(path = %path.display(), "loaded scoring config");
    }
    let now = resolve_now(args.now.as_deref())?;

    let payload = read_input(args.input.as_deref())?;
    let records = parse_records(&payload)?;
    let total = records.len();

    let scored = score_parallel(records, Arc::new(config), now).await?;
    let skipped = total - scored.len();
    let ranked = rank_augmented(scored);
    info!(total, skipped, "scored video batch");

    let output = if args.pretty {
        serde_json::to_string_pretty(&ranked)
    } else {
        serde_json::to_string(&ranked)
    }
    .map_err(|err| format!("failed to serialize output: {}", err))?;
    println!("{}", output);
    Ok(())
}

/// Splits the batch across blocking workers. Scoring shares nothing but the
/// read-only config, so chunks run without coordination.
async fn score_parallel(
    records: Vec<Value>,
    config: Arc<ScoringConfig>,
    now: DateTime<Utc>,
) -> Result<Vec<Value>, String> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let workers = std::thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(1);
    let chunk_size = records.len().div_ceil(workers).max(1);

    let mut handles = Vec::new();
    let mut offset = 0usize;
    let mut remaining = records;
    while !remaining.is_empty() {
        let tail = remaining.split_off(chunk_size.min(remaining.len()));
        let chunk = std::mem::replace(&mut remaining, tail);
        let config = Arc::clone(&config);
        let start = offset;
        offset += chunk.len();

        handles.push(tokio::task::spawn_blocking(move || {
            chunk
                .iter()
                .enumerate()
                .filter_map(|(index, record)| match augment_record(record, &config, now) {
                    Ok(augmented) => Some(augmented),
                    Err(err) => {
                        warn!(index = start + index, error = %err, "skipping record");
                        None
                    }
                })
                .collect::<Vec<Value>>()
        }));
    }

    let mut scored = Vec::new();
    for handle in handles {
        let chunk = handle
            .await
            .map_err(|err| format!("scoring worker failed: {}", err))?;
        scored.extend(chunk);
    }
    Ok(scored)
}

fn run_explain(args: ExplainArgs) -> Result<(), String> {
    let (config, _) = ScoringConfig::load(args.config)?;
    let now = resolve_now(args.now.as_deref())?;

    let metrics = VideoMetrics {
        title: args.title,
        description: args.description,
        channel: args.channel,
        category: args.category,
        view_count: parse_count_str(&args.views),
        like_count: parse_count_str(&args.likes),
        comment_count: parse_count_str(&args.comments),
        published_at: args.published_at.as_deref().and_then(parse_timestamp_str),
    };

    let result = analyze_with_config(&metrics, &config, now);

    println!(
        "Popularity score: {} (precise {})",
        result.popularity_score,
        format_float(result.popularity_score_precise, 3)
    );
    println!("Reason: {}", result.reason);

    if args.details {
        let scored = ScoringPipeline::from_config(&config).score(&metrics);
        let details = &result.view_details;

        println!("\nView details:");
        println!("  views: {}", details.views);
        println!("  growth_rate: {}", details.growth_rate);
        println!("  platform_mentions: {}", details.platform_mentions);
        println!("  matched_keywords: {}", details.matched_keywords);
        println!("  ai_opinion: {}", details.ai_opinion);
        println!("  score: {}", details.score);

        println!("\nSub-scores:");
        println!(
            "  views: {} ({} views)",
            format_float(scored.breakdown.views_score, 3),
            format_number(metrics.view_count as f64)
        );
        println!(
            "  engagement: {} (likes {} {} | comments {} {})",
            format_float(scored.breakdown.engagement_score, 3),
            format_percent(scored.engagement.like_ratio),
            scored.engagement.like_band.label(),
            format_percent(scored.engagement.comment_ratio),
            scored.engagement.comment_band.label()
        );
        println!("  keywords: {}", format_float(scored.breakdown.keyword_score, 3));
    }

    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<(), String> {
    ScoringConfig::default().write(&args.path)?;
    println!("Wrote default scoring config to {}", args.path.display());
    Ok(())
}

fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>, String> {
    match raw {
        Some(value) => {
            parse_timestamp_str(value).ok_or_else(|| format!("invalid --now timestamp: {}", value))
        }
        None => Ok(Utc::now()),
    }
}

fn read_input(path: Option<&Path>) -> Result<String, String> {
    if let Some(path) = path {
        return std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read {}: {}", path.display(), err));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    Ok(buffer)
}

/// Accepts a JSON array, a single JSON object, or JSON lines.
fn parse_records(payload: &str) -> Result<Vec<Value>, String> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err("missing input: pass --input or pipe records on stdin".to_string());
    }

    if let Ok(document) = serde_json::from_str::<Value>(trimmed) {
        return Ok(match document {
            Value::Array(records) => records,
            record => vec![record],
        });
    }

    let mut records = Vec::new();
    for (line_number, line) in trimmed.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = serde_json::from_str(line)
            .map_err(|err| format!("failed to parse line {}: {}", line_number + 1, err))?;
        records.push(record);
    }
    Ok(records)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("popularity_engine=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
