//! # Storage Layer
//!
//! This module defines the storage abstraction for rallylog. The
//! [`MediaStore`] trait allows the application to work with different vault
//! backends.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Support **environments without persistent storage** through the same
//!   interface, selected by dependency injection rather than platform checks
//! - Keep business logic **decoupled** from persistence details
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based vault
//!   - Index persisted in `index.json` (atomic replace-on-write)
//!   - Clip payloads in `media/{shot_type}-{uuid}.mp4`
//! - [`memory::InMemoryStore`]: In-memory vault for testing
//!   - Payload bytes held in a map, no persistence
//!
//! ## Vault Format
//!
//! For `FileStore`:
//! ```text
//! vault/
//! ├── index.json                      # Metadata for all clips
//! ├── media/
//! │   └── derecha-{uuid}.mp4          # Clip payloads, one file per entry
//! ├── scores.json                     # Append-only score history
//! └── config.json                     # Vault configuration
//! ```
//!
//! The index and payloads are stored separately so listing clips never reads
//! video bytes.
//!
//! ## Consistency Contract
//!
//! Every index entry must have a live backing file. Saving copies bytes
//! before touching the index, so a failed copy never leaves a dangling
//! entry; a failed index write after a successful copy leaves at worst an
//! orphan file, which [`MediaStore::doctor`] adopts or removes later.
//! Listing reconciles on the fly: entries whose file has disappeared are
//! pruned rather than returned.
//!
//! ## Concurrency
//!
//! Single-process, single-writer. All mutation goes through `&mut self`, so
//! the exclusive borrow serializes save/delete/sweep/reconcile against each
//! other; no lock is taken and none is needed.

use crate::error::Result;
use crate::model::{CaptureMeta, MediaFile, ShotType};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub mod fs;
pub mod index;
pub mod memory;

/// Report from the `doctor` operation.
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Index entries dropped because their backing file was gone.
    pub removed_entries: usize,
    /// Orphan media files adopted back into the index.
    pub adopted_files: usize,
}

/// Abstract interface for the clip vault.
///
/// Implementations must keep the index and the stored payloads consistent
/// with each other for every operation.
pub trait MediaStore {
    /// Copy a captured clip into the vault and index it
    fn save_media(&mut self, source: &Path, meta: CaptureMeta) -> Result<MediaFile>;

    /// Get a clip's metadata by ID
    fn get_media(&self, id: &Uuid) -> Result<MediaFile>;

    /// List clips newest-first, optionally filtered by shot type.
    /// Reconciles: entries whose backing file is missing are pruned, never returned.
    fn list_media(&mut self, filter: Option<ShotType>) -> Result<Vec<MediaFile>>;

    /// Delete a clip's payload and index entry. Deleting an unknown or
    /// already-deleted ID is success, not an error.
    fn delete_media(&mut self, id: &Uuid) -> Result<()>;

    /// Get the payload path for a clip
    fn media_path(&self, id: &Uuid) -> Result<PathBuf>;

    /// Attach the score-record back-reference once analysis completes
    fn attach_score(&mut self, id: &Uuid, score_id: Uuid) -> Result<()>;

    /// Verify and fix consistency issues in both directions
    fn doctor(&mut self) -> Result<DoctorReport>;
}
