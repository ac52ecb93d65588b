use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use rallylog::analytics::{classify_trend, ProgressAnalytics, ShotSummary};
use rallylog::api::RallyApi;
use rallylog::commands::config::ConfigAction;
use rallylog::commands::{CmdMessage, MessageLevel, RallyPaths};
use rallylog::config::RallyConfig;
use rallylog::error::{RallyError, Result};
use rallylog::model::{MediaFile, ShotType, SubScores, Trend};
use rallylog::store::fs::FileStore;
use std::path::PathBuf;
use std::str::FromStr;
use unicode_width::UnicodeWidthStr;
use uuid::Uuid;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: RallyApi<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Save {
            file,
            shot,
            duration,
        }) => handle_save(&mut ctx, file, shot, duration),
        Some(Commands::List { shot }) => handle_list(&mut ctx, shot),
        Some(Commands::Delete { ids }) => handle_delete(&mut ctx, ids),
        Some(Commands::Stats) => handle_stats(&mut ctx),
        Some(Commands::Sweep { days }) => handle_sweep(&mut ctx, days),
        Some(Commands::Record {
            user,
            shot,
            score,
            posture,
            timing,
            follow_through,
            power,
            clip,
        }) => {
            let subs = SubScores {
                posture,
                timing,
                follow_through,
                power,
            };
            handle_record(&mut ctx, user, shot, score, subs, clip)
        }
        Some(Commands::Summary { user }) => handle_summary(&mut ctx, user),
        Some(Commands::Doctor) => handle_doctor(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, None),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let vault_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "rallylog", "rallylog")
            .ok_or_else(|| RallyError::Store("Could not determine data dir".to_string()))?
            .data_dir()
            .to_path_buf(),
    };

    let config = RallyConfig::load(&vault_dir).unwrap_or_default();
    let store = FileStore::open(&vault_dir)?.with_media_ext(config.get_media_ext());
    let analytics = ProgressAnalytics::load(&vault_dir)?;
    let paths = RallyPaths { data: vault_dir };

    Ok(AppContext {
        api: RallyApi::new(store, analytics, config, paths),
    })
}

fn handle_save(ctx: &mut AppContext, file: PathBuf, shot: String, duration: f64) -> Result<()> {
    let shot_type = ShotType::from_str(&shot)?;
    let size_bytes = std::fs::metadata(&file).map(|m| m.len()).unwrap_or(0);

    let result = ctx.api.save_clip(&file, shot_type, duration, size_bytes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, shot: Option<String>) -> Result<()> {
    let filter = shot.as_deref().map(ShotType::from_str).transpose()?;
    let result = ctx.api.list_clips(filter)?;
    print_clips(&result.listed_media);
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, ids: Vec<String>) -> Result<()> {
    let resolved = resolve_ids(ctx, &ids)?;
    let result = ctx.api.delete_clips(&resolved)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_stats(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.clip_stats()?;
    if let Some(stats) = &result.stats {
        println!("Clips:      {}", stats.total_count);
        println!("Total size: {}", format_size(stats.total_size_bytes));
        if let Some(oldest) = stats.oldest {
            println!("Oldest:     {}", format_time_ago(oldest).trim_start());
        }
        if let Some(newest) = stats.newest {
            println!("Newest:     {}", format_time_ago(newest).trim_start());
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_sweep(ctx: &mut AppContext, days: Option<u32>) -> Result<()> {
    let result = ctx.api.sweep(days)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_record(
    ctx: &mut AppContext,
    user: String,
    shot: String,
    score: u8,
    subs: SubScores,
    clip: Option<String>,
) -> Result<()> {
    let shot_type = ShotType::from_str(&shot)?;
    let media_id = clip.map(|prefix| resolve_id(ctx, &prefix)).transpose()?;

    let result = ctx.api.record_score(&user, shot_type, score, subs, media_id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_summary(ctx: &mut AppContext, user: String) -> Result<()> {
    let result = ctx.api.user_summary(&user)?;
    print_summary(&result.summary);
    print_messages(&result.messages);
    Ok(())
}

fn handle_doctor(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.doctor()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.as_deref(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some("media-ext"), None) => ConfigAction::ShowKey("media-ext".to_string()),
        (Some("media-ext"), Some(v)) => ConfigAction::SetMediaExt(v),
        (Some("retention-days"), None) => ConfigAction::ShowKey("retention-days".to_string()),
        (Some("retention-days"), Some(v)) => {
            let days = v
                .parse()
                .map_err(|_| RallyError::Api(format!("Invalid day count: {}", v)))?;
            ConfigAction::SetRetentionDays(days)
        }
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
            return Ok(());
        }
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        println!("media-ext      = {}", config.get_media_ext());
        println!("retention-days = {}", config.retention_days);
    }
    print_messages(&result.messages);
    Ok(())
}

/// Resolve a user-supplied id prefix to exactly one stored clip.
fn resolve_id(ctx: &mut AppContext, prefix: &str) -> Result<Uuid> {
    let clips = ctx.api.list_clips(None)?.listed_media;
    let matches: Vec<&MediaFile> = clips
        .iter()
        .filter(|media| media.id.to_string().starts_with(prefix))
        .collect();

    match matches.len() {
        0 => Err(RallyError::Api(format!("No clip matches id {}", prefix))),
        1 => Ok(matches[0].id),
        _ => Err(RallyError::Api(format!(
            "Id {} is ambiguous ({} matches)",
            prefix,
            matches.len()
        ))),
    }
}

fn resolve_ids(ctx: &mut AppContext, prefixes: &[String]) -> Result<Vec<Uuid>> {
    prefixes
        .iter()
        .map(|prefix| resolve_id(ctx, prefix))
        .collect()
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const SCORED_MARKER: &str = "✓";

fn print_clips(clips: &[MediaFile]) {
    for media in clips {
        let full_id = media.id.to_string();
        let id_str = format!("{:.8} ", full_id);
        let label = format!("{}  {}", media.shot_type, format_size(media.size_bytes));

        let marker = if media.score_record_id.is_some() {
            format!("{} ", SCORED_MARKER)
        } else {
            "  ".to_string()
        };

        let time_ago = format_time_ago(media.captured_at);

        let fixed_width = 4 + id_str.width() + marker.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let padding = available.saturating_sub(label.width());

        println!(
            "    {}{}{}{}{}",
            id_str.yellow(),
            label,
            " ".repeat(padding),
            marker.green(),
            time_ago.dimmed()
        );
    }
}

fn print_summary(rows: &[ShotSummary]) {
    for row in rows {
        let trend = classify_trend(&row.recent_scores);
        let trend_str = match trend {
            Trend::Improving => trend.to_string().green(),
            Trend::Declining => trend.to_string().red(),
            Trend::Stable => trend.to_string().dimmed(),
        };
        let recent: Vec<String> = row.recent_scores.iter().map(|s| s.to_string()).collect();

        println!(
            "  {:<14} {:>3} scored  avg {:>5.1}  best {:>3}  [{}]  {}",
            row.shot_type.to_string(),
            row.count,
            row.average_score,
            row.best_score,
            recent.join(" "),
            trend_str
        );
    }
}

fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let bytes = bytes as f64;
    if bytes >= GB {
        format!("{:.1} GB", bytes / GB)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{} B", bytes)
    }
}

fn format_time_ago(timestamp: chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
