use super::index::StorageIndex;
use super::{DoctorReport, MediaStore};
use crate::error::{RallyError, Result};
use crate::model::{CaptureMeta, MediaFile, ShotType};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::SystemTime;
use uuid::Uuid;

const MEDIA_DIR: &str = "media";
const DEFAULT_MEDIA_EXT: &str = ".mp4";

pub struct FileStore {
    root: PathBuf,
    index: StorageIndex,
    media_ext: String,
}

impl FileStore {
    /// Open (or create) a vault rooted at `root`. The index is loaded once
    /// here and owned for the life of the store.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(MEDIA_DIR)).map_err(RallyError::Io)?;
        let index = StorageIndex::open(&root)?;
        Ok(Self {
            root,
            index,
            media_ext: DEFAULT_MEDIA_EXT.to_string(),
        })
    }

    pub fn with_media_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.media_ext = ext.to_string();
        } else {
            self.media_ext = format!(".{}", ext);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn media_dir(&self) -> PathBuf {
        self.root.join(MEDIA_DIR)
    }

    /// Destination name is fully determined by (shot type, id).
    fn media_filename(&self, shot: ShotType, id: &Uuid) -> String {
        format!("{}-{}{}", shot, id, self.media_ext)
    }

    /// Inverse of [`media_filename`]: shot names never contain a dash, so
    /// everything up to the first dash is the shot and the rest is the id.
    fn parse_media_filename(&self, name: &str) -> Option<(ShotType, Uuid)> {
        let stem = name.strip_suffix(self.media_ext.as_str())?;
        let (shot_part, id_part) = stem.split_once('-')?;
        let shot = ShotType::from_str(shot_part).ok()?;
        let id = Uuid::parse_str(id_part).ok()?;
        Some((shot, id))
    }

    /// Drop every index entry whose backing file has disappeared; persists
    /// only when something was pruned. Returns how many entries went.
    fn reconcile(&mut self) -> Result<usize> {
        let missing: Vec<Uuid> = self
            .index
            .values()
            .filter(|media| !media.storage_path.exists())
            .map(|media| media.id)
            .collect();

        for id in &missing {
            self.index.remove(id);
        }
        if !missing.is_empty() {
            self.index.persist()?;
        }
        Ok(missing.len())
    }
}

impl MediaStore for FileStore {
    fn save_media(&mut self, source: &Path, meta: CaptureMeta) -> Result<MediaFile> {
        let id = Uuid::new_v4();
        let dest = self.media_dir().join(self.media_filename(meta.shot_type, &id));

        // Copy first. The index is only written after the payload is on
        // disk, so a failed copy cannot leave a dangling entry; a failed
        // index write below leaves at worst an orphan file for doctor.
        let copied = fs::copy(source, &dest).map_err(|source_err| RallyError::CopyFailed {
            path: source.to_path_buf(),
            source: source_err,
        })?;

        let media = MediaFile::new(id, &meta, dest, copied);
        self.index.insert(media.clone());
        self.index.persist()?;
        Ok(media)
    }

    fn get_media(&self, id: &Uuid) -> Result<MediaFile> {
        self.index
            .get(id)
            .cloned()
            .ok_or(RallyError::MediaNotFound(*id))
    }

    fn list_media(&mut self, filter: Option<ShotType>) -> Result<Vec<MediaFile>> {
        self.reconcile()?;

        let mut clips: Vec<MediaFile> = self
            .index
            .values()
            .filter(|media| filter.is_none_or(|shot| media.shot_type == shot))
            .cloned()
            .collect();
        clips.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
        Ok(clips)
    }

    fn delete_media(&mut self, id: &Uuid) -> Result<()> {
        // Unknown or already-deleted id: nothing to do, by contract.
        let Some(media) = self.index.get(id).cloned() else {
            return Ok(());
        };

        // The entry is only removed after the file is confirmed gone.
        match fs::remove_file(&media.storage_path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(RallyError::DeleteFailed {
                    path: media.storage_path,
                    source: e,
                })
            }
        }

        self.index.remove(id);
        self.index.persist()?;
        Ok(())
    }

    fn media_path(&self, id: &Uuid) -> Result<PathBuf> {
        self.index
            .get(id)
            .map(|media| media.storage_path.clone())
            .ok_or(RallyError::MediaNotFound(*id))
    }

    fn attach_score(&mut self, id: &Uuid, score_id: Uuid) -> Result<()> {
        let media = self
            .index
            .get_mut(id)
            .ok_or(RallyError::MediaNotFound(*id))?;
        media.score_record_id = Some(score_id);
        self.index.persist()?;
        Ok(())
    }

    fn doctor(&mut self) -> Result<DoctorReport> {
        let mut report = DoctorReport::default();

        // 1. Drop entries whose file is gone
        report.removed_entries = self.reconcile()?;

        // 2. Adopt orphan payloads back into the index
        let mut adopted = false;
        for entry in fs::read_dir(self.media_dir()).map_err(RallyError::Io)? {
            let entry = entry.map_err(RallyError::Io)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some((shot, id)) = self.parse_media_filename(name) else {
                continue;
            };
            if self.index.contains(&id) {
                continue;
            }

            // Capture time and duration are gone with the original index
            // entry; file metadata is the best remaining witness.
            let file_meta = fs::metadata(&path).map_err(RallyError::Io)?;
            let captured_at: DateTime<Utc> =
                file_meta.modified().unwrap_or(SystemTime::now()).into();

            self.index.insert(MediaFile {
                id,
                shot_type: shot,
                storage_path: path,
                captured_at,
                duration_seconds: 0.0,
                size_bytes: file_meta.len(),
                score_record_id: None,
            });
            report.adopted_files += 1;
            adopted = true;
        }

        if adopted {
            self.index.persist()?;
        }
        Ok(report)
    }
}
