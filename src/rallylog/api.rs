//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the
//! single entry point for all rallylog operations, regardless of the UI
//! sitting on top.
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Wires** the cross-cutting steps the product wants on every call
//!   (the opportunistic retention sweep before each ingest, persisting the
//!   score history after each append)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no formatting, and no terminal I/O; that
//! split is what lets the same core serve a CLI today and any other
//! surface later.
//!
//! ## Generic Over MediaStore
//!
//! `RallyApi<S: MediaStore>` is generic over the vault backend:
//! - Production: `RallyApi<FileStore>`
//! - Testing / no persistent storage: `RallyApi<InMemoryStore>`

use crate::analytics::ProgressAnalytics;
use crate::commands;
use crate::commands::config::ConfigAction;
use crate::commands::{CmdMessage, CmdResult, RallyPaths};
use crate::config::RallyConfig;
use crate::error::Result;
use crate::model::{CaptureMeta, ScoreRecord, ShotType, SubScores};
use crate::retention::RetentionPolicy;
use crate::store::MediaStore;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct RallyApi<S: MediaStore> {
    store: S,
    analytics: ProgressAnalytics,
    config: RallyConfig,
    paths: RallyPaths,
}

impl<S: MediaStore> RallyApi<S> {
    pub fn new(
        store: S,
        analytics: ProgressAnalytics,
        config: RallyConfig,
        paths: RallyPaths,
    ) -> Self {
        Self {
            store,
            analytics,
            config,
            paths,
        }
    }

    /// Ingest one captured clip. Growth is bounded first: when retention is
    /// enabled, a sweep runs before the save so the vault never holds more
    /// than one save beyond the configured window.
    pub fn save_clip(
        &mut self,
        source: &Path,
        shot_type: ShotType,
        duration_seconds: f64,
        size_bytes: u64,
    ) -> Result<CmdResult> {
        let swept = if self.config.retention_days > 0 {
            let policy = RetentionPolicy::new(self.config.retention_days);
            Some(policy.sweep(&mut self.store)?)
        } else {
            None
        };

        let meta = CaptureMeta::new(shot_type, duration_seconds, size_bytes);
        let mut result = commands::save::run(&mut self.store, source, meta)?;

        if let Some(report) = swept {
            if report.deleted > 0 || report.failed > 0 {
                result.add_message(CmdMessage::info(format!(
                    "Retention sweep removed {} expired clip(s) first.",
                    report.deleted
                )));
            }
            result.sweep = Some(report);
        }
        Ok(result)
    }

    pub fn list_clips(&mut self, filter: Option<ShotType>) -> Result<CmdResult> {
        commands::list::run(&mut self.store, filter)
    }

    pub fn delete_clips(&mut self, ids: &[Uuid]) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, ids)
    }

    pub fn clip_stats(&mut self) -> Result<CmdResult> {
        commands::stats::run(&mut self.store)
    }

    pub fn sweep(&mut self, max_age_days: Option<u32>) -> Result<CmdResult> {
        let days = max_age_days.unwrap_or(self.config.retention_days);
        if days == 0 {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::info("Retention is disabled."));
            return Ok(result);
        }
        commands::sweep::run(&mut self.store, &RetentionPolicy::new(days))
    }

    /// Finalize one analysis result and make the history durable.
    pub fn record_score(
        &mut self,
        user_id: &str,
        shot_type: ShotType,
        overall_score: u8,
        subs: SubScores,
        media_id: Option<Uuid>,
    ) -> Result<CmdResult> {
        let record = ScoreRecord::new(user_id, shot_type, overall_score, subs)?;
        let result = commands::record::run(&mut self.store, &mut self.analytics, record, media_id)?;
        self.analytics.persist(&self.paths.data)?;
        Ok(result)
    }

    pub fn user_summary(&self, user_id: &str) -> Result<CmdResult> {
        commands::summary::run(&self.analytics, user_id)
    }

    pub fn doctor(&mut self) -> Result<CmdResult> {
        commands::doctor::run(&mut self.store)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.paths, action)?;
        // Keep the in-process view in step with what was just written.
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    pub fn clip_path(&self, id: &Uuid) -> Result<PathBuf> {
        self.store.media_path(id)
    }

    pub fn paths(&self) -> &RallyPaths {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn api_in(dir: &Path) -> RallyApi<InMemoryStore> {
        RallyApi::new(
            InMemoryStore::new(),
            ProgressAnalytics::new(),
            RallyConfig::default(),
            RallyPaths {
                data: dir.to_path_buf(),
            },
        )
    }

    #[test]
    fn record_score_persists_the_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api_in(dir.path());

        api.record_score("ana", ShotType::Derecha, 70, SubScores::default(), None)
            .unwrap();

        assert!(dir.path().join("scores.json").exists());
        let reloaded = ProgressAnalytics::load(dir.path()).unwrap();
        assert_eq!(reloaded.stats_for("ana", ShotType::Derecha).unwrap().count, 1);
    }

    #[test]
    fn save_clip_sweeps_expired_clips_first() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("capture.mp4");
        std::fs::write(&source, vec![0u8; 64]).unwrap();

        let store = crate::store::memory::fixtures::StoreFixture::new()
            .with_aged_clip(ShotType::Derecha, 100, 45)
            .store;
        let mut api = RallyApi::new(
            store,
            ProgressAnalytics::new(),
            RallyConfig::default(),
            RallyPaths {
                data: dir.path().to_path_buf(),
            },
        );

        let result = api
            .save_clip(&source, ShotType::Saque, 2.0, 64)
            .unwrap();

        assert_eq!(result.sweep.unwrap().deleted, 1);
        // Only the fresh save remains.
        let listed = api.list_clips(None).unwrap().listed_media;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].shot_type, ShotType::Saque);
    }

    #[test]
    fn out_of_range_score_is_rejected_at_the_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api_in(dir.path());

        let err = api.record_score("ana", ShotType::Derecha, 120, SubScores::default(), None);
        assert!(err.is_err());
        assert!(api.user_summary("ana").unwrap().summary.is_empty());
    }
}
