use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::MediaStore;

pub fn run<S: MediaStore>(store: &mut S) -> Result<CmdResult> {
    let report = store.doctor()?;
    let mut result = CmdResult::default();

    if report.removed_entries == 0 && report.adopted_files == 0 {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    } else {
        result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
        if report.removed_entries > 0 {
            result.add_message(CmdMessage::info(format!(
                "  - Removed {} clip(s) indexed but missing from disk.",
                report.removed_entries
            )));
        }
        if report.adopted_files > 0 {
            result.add_message(CmdMessage::success(format!(
                "  - Adopted {} clip file(s) found on disk but missing from the index.",
                report.adopted_files
            )));
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShotType;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn clean_vault_reports_no_inconsistencies() {
        let mut store = StoreFixture::new().with_clip(ShotType::Derecha, 100).store;
        let result = run(&mut store).unwrap();
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn pruned_entries_are_reported() {
        let fixture = StoreFixture::new().with_clip(ShotType::Derecha, 100);
        let victim = fixture.ids()[0];
        let mut store = fixture.orphan_entry(&victim).store;

        let result = run(&mut store).unwrap();
        assert_eq!(result.messages.len(), 2);
    }
}
