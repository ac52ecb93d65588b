use crate::analytics::ShotSummary;
use crate::config::RallyConfig;
use crate::model::{MediaFile, ScoreRecord};
use crate::retention::SweepReport;
use std::path::PathBuf;

pub mod config;
pub mod delete;
pub mod doctor;
pub mod list;
pub mod record;
pub mod save;
pub mod stats;
pub mod summary;
pub mod sweep;

/// Where the vault lives on disk. Passed to commands that read or write
/// files outside the store trait (config, score history).
#[derive(Debug, Clone)]
pub struct RallyPaths {
    pub data: PathBuf,
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_media: Vec<MediaFile>,
    pub listed_media: Vec<MediaFile>,
    pub media_paths: Vec<PathBuf>,
    pub stats: Option<stats::StoreStats>,
    pub sweep: Option<SweepReport>,
    pub summary: Vec<ShotSummary>,
    pub score: Option<ScoreRecord>,
    pub config: Option<RallyConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_media(mut self, media: Vec<MediaFile>) -> Self {
        self.affected_media = media;
        self
    }

    pub fn with_listed_media(mut self, media: Vec<MediaFile>) -> Self {
        self.listed_media = media;
        self
    }

    pub fn with_stats(mut self, stats: stats::StoreStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_sweep(mut self, report: SweepReport) -> Self {
        self.sweep = Some(report);
        self
    }

    pub fn with_summary(mut self, summary: Vec<ShotSummary>) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_score(mut self, score: ScoreRecord) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_config(mut self, config: RallyConfig) -> Self {
        self.config = Some(config);
        self
    }
}
