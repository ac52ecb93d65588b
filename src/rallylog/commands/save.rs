use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::CaptureMeta;
use crate::store::MediaStore;
use std::path::Path;

pub fn run<S: MediaStore>(store: &mut S, source: &Path, meta: CaptureMeta) -> Result<CmdResult> {
    let shot = meta.shot_type;
    let media = store.save_media(source, meta)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Saved {} clip {} ({} bytes)",
        shot, media.id, media.size_bytes
    )));
    Ok(result.with_affected_media(vec![media]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShotType;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn saves_and_reports_the_new_clip() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("capture.mp4");
        std::fs::write(&source, vec![1u8; 256]).unwrap();

        let mut store = InMemoryStore::new();
        let result = run(
            &mut store,
            &source,
            CaptureMeta::new(ShotType::Derecha, 3.2, 256),
        )
        .unwrap();

        assert_eq!(result.affected_media.len(), 1);
        assert_eq!(result.affected_media[0].shot_type, ShotType::Derecha);
        assert_eq!(result.affected_media[0].size_bytes, 256);
        assert_eq!(store.list_media(None).unwrap().len(), 1);
    }

    #[test]
    fn missing_source_reports_failure_and_stores_nothing() {
        let mut store = InMemoryStore::new();
        let err = run(
            &mut store,
            Path::new("/no/such/capture.mp4"),
            CaptureMeta::new(ShotType::Reves, 1.0, 64),
        );

        assert!(err.is_err());
        assert!(store.list_media(None).unwrap().is_empty());
    }
}
