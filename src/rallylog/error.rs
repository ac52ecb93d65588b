use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum RallyError {
    #[error("Media not found: {0}")]
    MediaNotFound(Uuid),

    #[error("Storage index at {path} is corrupt: {source}")]
    IndexCorrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Score history at {path} is corrupt: {source}")]
    HistoryCorrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to copy media from {path}: {source}")]
    CopyFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to delete media at {path}: {source}")]
    DeleteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Score {value} for {field} is out of range (expected 0-100)")]
    ScoreOutOfRange { field: &'static str, value: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, RallyError>;
