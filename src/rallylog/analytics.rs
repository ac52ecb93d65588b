//! Progress aggregation over the append-only score history.
//!
//! Aggregates are derived state: they are updated in a streaming fashion on
//! every [`ProgressAnalytics::record`] call, and [`AggregateStats::recompute`]
//! rebuilds them from the raw history as the recovery and consistency-check
//! path. Loading from disk always goes through a full replay, so the two
//! paths cannot drift without a test noticing.

use crate::compare;
use crate::error::{RallyError, Result};
use crate::model::{ScoreRecord, ShotType, Trend};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::Path;

const SCORES_FILENAME: &str = "scores.json";

/// How many recent scores are kept for display.
pub const RECENT_WINDOW: usize = 5;
/// How many samples the trend verdict looks at.
pub const TREND_WINDOW: usize = 3;
/// Point delta over the trend window that counts as movement. Exactly this
/// many points is still `Stable`.
pub const TREND_THRESHOLD: i16 = 5;

/// Classifies score movement over the most recent [`TREND_WINDOW`] samples:
/// first-vs-last delta beyond [`TREND_THRESHOLD`] points in either direction.
/// Fewer than three samples is always `Stable`.
pub fn classify_trend(scores: &[u8]) -> Trend {
    if scores.len() < TREND_WINDOW {
        return Trend::Stable;
    }
    let window = &scores[scores.len() - TREND_WINDOW..];
    let delta = window[TREND_WINDOW - 1] as i16 - window[0] as i16;
    if delta > TREND_THRESHOLD {
        Trend::Improving
    } else if delta < -TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Running aggregates for one (user, shot type) pair.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateStats {
    pub count: u64,
    pub average_score: f64,
    pub best_score: u8,
    pub recent_scores: VecDeque<u8>,
}

impl AggregateStats {
    /// Streaming update: incremental mean, running max, bounded ring.
    pub fn push(&mut self, score: u8) {
        self.count += 1;
        self.average_score =
            ((self.average_score * (self.count - 1) as f64) + score as f64) / self.count as f64;
        self.best_score = self.best_score.max(score);

        self.recent_scores.push_back(score);
        if self.recent_scores.len() > RECENT_WINDOW {
            self.recent_scores.pop_front();
        }
    }

    /// Rebuild from the raw history. Count, average and best are
    /// order-independent; the recent ring follows history order.
    pub fn recompute(history: &[ScoreRecord]) -> Self {
        let count = history.len() as u64;
        let average_score = if history.is_empty() {
            0.0
        } else {
            history.iter().map(|r| r.overall_score as f64).sum::<f64>() / count as f64
        };
        let best_score = history.iter().map(|r| r.overall_score).max().unwrap_or(0);
        let recent_scores = history
            .iter()
            .skip(history.len().saturating_sub(RECENT_WINDOW))
            .map(|r| r.overall_score)
            .collect();

        Self {
            count,
            average_score,
            best_score,
            recent_scores,
        }
    }
}

/// One row of a per-user progress summary, serialized as-is by whatever
/// export surface sits on top.
#[derive(Debug, Clone, Serialize)]
pub struct ShotSummary {
    pub shot_type: ShotType,
    pub count: u64,
    pub average_score: f64,
    pub best_score: u8,
    pub recent_scores: Vec<u8>,
}

#[derive(Debug, Default)]
struct ShotProgress {
    history: Vec<ScoreRecord>,
    stats: AggregateStats,
}

/// Append-only score history per (user, shot type), with streaming
/// aggregates kept alongside.
#[derive(Debug, Default)]
pub struct ProgressAnalytics {
    entries: HashMap<(String, ShotType), ShotProgress>,
}

impl ProgressAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the persisted history from `dir/scores.json`, rebuilding all
    /// aggregates by replay. Missing file is an empty history; a file that
    /// cannot be parsed is `HistoryCorrupt`.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(SCORES_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(RallyError::Io)?;
        let records: Vec<ScoreRecord> =
            serde_json::from_str(&content).map_err(|source| RallyError::HistoryCorrupt {
                path: path.clone(),
                source,
            })?;

        let mut analytics = Self::default();
        for record in records {
            analytics.replay(record);
        }
        Ok(analytics)
    }

    /// Atomically write the full history back out, chronologically flat.
    pub fn persist(&self, dir: &Path) -> Result<()> {
        let mut all: Vec<&ScoreRecord> = self
            .entries
            .values()
            .flat_map(|progress| progress.history.iter())
            .collect();
        all.sort_by_key(|record| record.created_at);

        let content = serde_json::to_string_pretty(&all)?;
        let path = dir.join(SCORES_FILENAME);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(RallyError::Io)?;
        fs::rename(&tmp, &path).map_err(RallyError::Io)?;
        Ok(())
    }

    /// Append a freshly validated record: the comparison verdict against the
    /// prior history of its key is attached here, once, then the aggregates
    /// are updated. Returns the record as stored.
    pub fn record(&mut self, mut record: ScoreRecord) -> ScoreRecord {
        let key = (record.user_id.clone(), record.shot_type);
        let progress = self.entries.entry(key).or_default();

        record.comparison = compare::compare(&record, &progress.history);
        progress.stats.push(record.overall_score);
        progress.history.push(record.clone());
        record
    }

    /// Append a record that already carries its verdict (disk replay).
    fn replay(&mut self, record: ScoreRecord) {
        let key = (record.user_id.clone(), record.shot_type);
        let progress = self.entries.entry(key).or_default();
        progress.stats.push(record.overall_score);
        progress.history.push(record);
    }

    pub fn stats_for(&self, user_id: &str, shot_type: ShotType) -> Option<&AggregateStats> {
        self.entries
            .get(&(user_id.to_string(), shot_type))
            .map(|progress| &progress.stats)
    }

    pub fn history_for(&self, user_id: &str, shot_type: ShotType) -> &[ScoreRecord] {
        self.entries
            .get(&(user_id.to_string(), shot_type))
            .map(|progress| progress.history.as_slice())
            .unwrap_or(&[])
    }

    /// One row per shot type the user has ever recorded, sorted by shot
    /// type for determinism.
    pub fn summary_for_user(&self, user_id: &str) -> Vec<ShotSummary> {
        let mut rows: Vec<ShotSummary> = self
            .entries
            .iter()
            .filter(|((user, _), _)| user == user_id)
            .map(|((_, shot_type), progress)| ShotSummary {
                shot_type: *shot_type,
                count: progress.stats.count,
                average_score: progress.stats.average_score,
                best_score: progress.stats.best_score,
                recent_scores: progress.stats.recent_scores.iter().copied().collect(),
            })
            .collect();
        rows.sort_by_key(|row| row.shot_type);
        rows
    }
}
