use crate::error::{RallyError, Result};
use crate::model::MediaFile;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const INDEX_FILENAME: &str = "index.json";

/// The persisted clip index: the single source of truth for what the vault
/// holds. Owned by the store and loaded once per process; all mutation flows
/// through `&mut` methods and becomes durable on [`StorageIndex::persist`].
#[derive(Debug)]
pub struct StorageIndex {
    path: PathBuf,
    entries: HashMap<Uuid, MediaFile>,
}

impl StorageIndex {
    /// Load the index from `dir/index.json`. A missing file is an empty
    /// index; a file that exists but cannot be parsed is `IndexCorrupt` and
    /// never yields a partially-constructed mapping.
    pub fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(INDEX_FILENAME);
        if !path.exists() {
            return Ok(Self {
                path,
                entries: HashMap::new(),
            });
        }

        let content = fs::read_to_string(&path).map_err(RallyError::Io)?;
        let entries: HashMap<Uuid, MediaFile> = serde_json::from_str(&content)
            .map_err(|source| RallyError::IndexCorrupt {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path, entries })
    }

    /// Atomically replace the persisted index: serialize to a sibling temp
    /// file, then rename over the real one. A crash mid-write leaves either
    /// the old index or the new one, never a truncated file.
    pub fn persist(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(RallyError::Io)?;
        fs::rename(&tmp, &self.path).map_err(RallyError::Io)?;
        Ok(())
    }

    pub fn insert(&mut self, media: MediaFile) {
        self.entries.insert(media.id, media);
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<MediaFile> {
        self.entries.remove(id)
    }

    pub fn get(&self, id: &Uuid) -> Option<&MediaFile> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut MediaFile> {
        self.entries.get_mut(id)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.entries.contains_key(id)
    }

    pub fn values(&self) -> impl Iterator<Item = &MediaFile> {
        self.entries.values()
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
