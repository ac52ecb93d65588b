use super::{DoctorReport, MediaStore};
use crate::error::{RallyError, Result};
use crate::model::{CaptureMeta, MediaFile, ShotType};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// In-memory vault for testing and for environments without persistent
/// storage. Payload bytes live in a map; nothing survives the process.
#[derive(Default)]
pub struct InMemoryStore {
    entries: HashMap<Uuid, MediaFile>,
    payloads: HashMap<Uuid, Vec<u8>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MediaStore for InMemoryStore {
    fn save_media(&mut self, source: &Path, meta: CaptureMeta) -> Result<MediaFile> {
        // Same ordering contract as the file store: the payload is read in
        // full before the entry exists.
        let bytes = std::fs::read(source).map_err(|e| RallyError::CopyFailed {
            path: source.to_path_buf(),
            source: e,
        })?;

        let id = Uuid::new_v4();
        let virtual_path = PathBuf::from(format!("mem/{}-{}", meta.shot_type, id));
        let size = bytes.len() as u64;
        let media = MediaFile::new(id, &meta, virtual_path, size);

        self.payloads.insert(id, bytes);
        self.entries.insert(id, media.clone());
        Ok(media)
    }

    fn get_media(&self, id: &Uuid) -> Result<MediaFile> {
        self.entries
            .get(id)
            .cloned()
            .ok_or(RallyError::MediaNotFound(*id))
    }

    fn list_media(&mut self, filter: Option<ShotType>) -> Result<Vec<MediaFile>> {
        // Reconcile exactly like the file store: an entry without a payload
        // is pruned, never listed.
        let dangling: Vec<Uuid> = self
            .entries
            .keys()
            .filter(|id| !self.payloads.contains_key(id))
            .copied()
            .collect();
        for id in dangling {
            self.entries.remove(&id);
        }

        let mut clips: Vec<MediaFile> = self
            .entries
            .values()
            .filter(|media| filter.is_none_or(|shot| media.shot_type == shot))
            .cloned()
            .collect();
        clips.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
        Ok(clips)
    }

    fn delete_media(&mut self, id: &Uuid) -> Result<()> {
        self.payloads.remove(id);
        self.entries.remove(id);
        Ok(())
    }

    fn media_path(&self, id: &Uuid) -> Result<PathBuf> {
        self.entries
            .get(id)
            .map(|media| media.storage_path.clone())
            .ok_or(RallyError::MediaNotFound(*id))
    }

    fn attach_score(&mut self, id: &Uuid, score_id: Uuid) -> Result<()> {
        let media = self
            .entries
            .get_mut(id)
            .ok_or(RallyError::MediaNotFound(*id))?;
        media.score_record_id = Some(score_id);
        Ok(())
    }

    fn doctor(&mut self) -> Result<DoctorReport> {
        let before = self.entries.len();
        self.list_media(None)?;
        Ok(DoctorReport {
            removed_entries: before - self.entries.len(),
            adopted_files: 0,
        })
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::{Duration, Utc};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Insert a clip directly, bypassing the source-path copy.
        pub fn with_clip(self, shot: ShotType, size_bytes: u64) -> Self {
            self.with_aged_clip(shot, size_bytes, 0)
        }

        /// Insert a clip captured `age_days` ago.
        pub fn with_aged_clip(mut self, shot: ShotType, size_bytes: u64, age_days: i64) -> Self {
            let mut meta = CaptureMeta::new(shot, 4.0, size_bytes);
            meta.captured_at = Utc::now() - Duration::days(age_days);

            let id = Uuid::new_v4();
            let virtual_path = PathBuf::from(format!("mem/{}-{}", shot, id));
            let media = MediaFile::new(id, &meta, virtual_path, size_bytes);

            self.store.payloads.insert(id, vec![0u8; size_bytes as usize]);
            self.store.entries.insert(id, media);
            self
        }

        /// Drop a clip's payload while keeping its entry, simulating
        /// external deletion of the backing file.
        pub fn orphan_entry(mut self, id: &Uuid) -> Self {
            self.store.payloads.remove(id);
            self
        }

        pub fn ids(&self) -> Vec<Uuid> {
            self.store.entries.keys().copied().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    #[test]
    fn list_prunes_entries_without_payload() {
        let fixture = StoreFixture::new()
            .with_clip(ShotType::Derecha, 100)
            .with_clip(ShotType::Reves, 100);
        let victim = fixture.store.entries.keys().next().copied().unwrap();

        let mut store = fixture.orphan_entry(&victim).store;
        let listed = store.list_media(None).unwrap();

        assert_eq!(listed.len(), 1);
        assert!(listed.iter().all(|m| m.id != victim));
        assert!(store.get_media(&victim).is_err());
    }

    #[test]
    fn delete_unknown_id_is_success() {
        let mut store = InMemoryStore::new();
        store.delete_media(&Uuid::new_v4()).unwrap();
    }

    #[test]
    fn doctor_counts_pruned_entries() {
        let fixture = StoreFixture::new().with_clip(ShotType::Bandeja, 50);
        let victim = fixture.store.entries.keys().next().copied().unwrap();
        let mut store = fixture.orphan_entry(&victim).store;

        let report = store.doctor().unwrap();
        assert_eq!(report.removed_entries, 1);
        assert_eq!(report.adopted_files, 0);
    }
}
