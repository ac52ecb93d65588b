use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::MediaStore;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Pure aggregation over the reconciled listing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    pub total_count: usize,
    pub total_size_bytes: u64,
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
}

pub fn run<S: MediaStore>(store: &mut S) -> Result<CmdResult> {
    let clips = store.list_media(None)?;

    let stats = StoreStats {
        total_count: clips.len(),
        total_size_bytes: clips.iter().map(|media| media.size_bytes).sum(),
        // list_media is newest-first
        newest: clips.first().map(|media| media.captured_at),
        oldest: clips.last().map(|media| media.captured_at),
    };

    Ok(CmdResult::default().with_stats(stats))
}
