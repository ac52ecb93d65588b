use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::MediaStore;
use uuid::Uuid;

pub fn run<S: MediaStore>(store: &mut S, ids: &[Uuid]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for id in ids {
        match store.get_media(id) {
            Ok(media) => {
                store.delete_media(id)?;
                result.add_message(CmdMessage::success(format!(
                    "Deleted {} clip {}",
                    media.shot_type, media.id
                )));
                result.affected_media.push(media);
            }
            // Absent is not an error: deleting twice is the same as once.
            Err(_) => {
                store.delete_media(id)?;
                result.add_message(CmdMessage::info(format!("Clip {} already gone", id)));
            }
        }
    }

    Ok(result)
}
