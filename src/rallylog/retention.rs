//! Age-based retention sweep over the clip vault.

use crate::error::Result;
use crate::store::MediaStore;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Outcome of one sweep. Per-entry failures never abort the pass; they are
/// counted and the sweep moves on.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub deleted: usize,
    pub failed: usize,
}

/// Advisory, best-effort deletion of clips older than a fixed age. Safe to
/// run at any time: an empty vault or a vault with nothing expired is a
/// successful sweep of zero.
#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    max_age_days: u32,
}

impl RetentionPolicy {
    pub fn new(max_age_days: u32) -> Self {
        Self { max_age_days }
    }

    pub fn max_age_days(&self) -> u32 {
        self.max_age_days
    }

    pub fn sweep<S: MediaStore>(&self, store: &mut S) -> Result<SweepReport> {
        self.sweep_at(store, Utc::now())
    }

    /// Sweep against an explicit clock. A clip expires only when its age
    /// strictly exceeds the threshold; listing first also reconciles, so
    /// entries whose file already vanished are pruned rather than counted.
    pub fn sweep_at<S: MediaStore>(
        &self,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> Result<SweepReport> {
        let cutoff = now - Duration::days(self.max_age_days as i64);
        let expired: Vec<Uuid> = store
            .list_media(None)?
            .into_iter()
            .filter(|media| media.captured_at < cutoff)
            .map(|media| media.id)
            .collect();

        let mut report = SweepReport::default();
        for id in expired {
            match store.delete_media(&id) {
                Ok(()) => report.deleted += 1,
                Err(_) => report.failed += 1,
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RallyError;
    use crate::model::{CaptureMeta, MediaFile, ShotType};
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use crate::store::DoctorReport;
    use std::path::{Path, PathBuf};

    #[test]
    fn sweep_of_an_empty_vault_deletes_nothing() {
        let mut store = InMemoryStore::new();
        let report = RetentionPolicy::new(30).sweep(&mut store).unwrap();
        assert_eq!(report, SweepReport::default());
    }

    #[test]
    fn expired_clips_go_and_fresh_ones_survive() {
        let mut store = StoreFixture::new()
            .with_aged_clip(ShotType::Derecha, 100, 31)
            .with_aged_clip(ShotType::Derecha, 100, 29)
            .store;

        let report = RetentionPolicy::new(30).sweep(&mut store).unwrap();
        assert_eq!(report.deleted, 1);
        assert_eq!(report.failed, 0);

        let survivors = store.list_media(None).unwrap();
        assert_eq!(survivors.len(), 1);
    }

    #[test]
    fn sweeping_twice_deletes_zero_the_second_time() {
        let mut store = StoreFixture::new()
            .with_aged_clip(ShotType::Saque, 100, 40)
            .with_aged_clip(ShotType::Saque, 100, 50)
            .store;

        let policy = RetentionPolicy::new(30);
        assert_eq!(policy.sweep(&mut store).unwrap().deleted, 2);
        assert_eq!(policy.sweep(&mut store).unwrap().deleted, 0);
    }

    /// Wraps the in-memory store and fails deletion of marked ids, to pin
    /// the collect-and-continue contract.
    struct FlakyStore {
        inner: InMemoryStore,
        poisoned: Vec<Uuid>,
    }

    impl MediaStore for FlakyStore {
        fn save_media(&mut self, source: &Path, meta: CaptureMeta) -> Result<MediaFile> {
            self.inner.save_media(source, meta)
        }
        fn get_media(&self, id: &Uuid) -> Result<MediaFile> {
            self.inner.get_media(id)
        }
        fn list_media(&mut self, filter: Option<ShotType>) -> Result<Vec<MediaFile>> {
            self.inner.list_media(filter)
        }
        fn delete_media(&mut self, id: &Uuid) -> Result<()> {
            if self.poisoned.contains(id) {
                return Err(RallyError::Store("disk said no".to_string()));
            }
            self.inner.delete_media(id)
        }
        fn media_path(&self, id: &Uuid) -> Result<PathBuf> {
            self.inner.media_path(id)
        }
        fn attach_score(&mut self, id: &Uuid, score_id: Uuid) -> Result<()> {
            self.inner.attach_score(id, score_id)
        }
        fn doctor(&mut self) -> Result<DoctorReport> {
            self.inner.doctor()
        }
    }

    #[test]
    fn one_failed_delete_does_not_abort_the_rest() {
        let mut inner = StoreFixture::new()
            .with_aged_clip(ShotType::Remate, 100, 40)
            .with_aged_clip(ShotType::Remate, 100, 41)
            .with_aged_clip(ShotType::Remate, 100, 42)
            .store;
        let poisoned = vec![inner.list_media(None).unwrap()[0].id];
        let mut store = FlakyStore { inner, poisoned };

        let report = RetentionPolicy::new(30).sweep(&mut store).unwrap();
        assert_eq!(report.deleted, 2);
        assert_eq!(report.failed, 1);
    }
}
