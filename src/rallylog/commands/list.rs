use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ShotType;
use crate::store::MediaStore;

pub fn run<S: MediaStore>(store: &mut S, filter: Option<ShotType>) -> Result<CmdResult> {
    let listed = store.list_media(filter)?;

    let mut result = CmdResult::default().with_listed_media(listed);
    if result.listed_media.is_empty() {
        result.add_message(CmdMessage::info("No clips found."));
    }
    Ok(result)
}
