use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::retention::RetentionPolicy;
use crate::store::MediaStore;

pub fn run<S: MediaStore>(store: &mut S, policy: &RetentionPolicy) -> Result<CmdResult> {
    let report = policy.sweep(store)?;

    let mut result = CmdResult::default();
    if report.deleted == 0 && report.failed == 0 {
        result.add_message(CmdMessage::info(format!(
            "Nothing older than {} days.",
            policy.max_age_days()
        )));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Swept {} clip(s) older than {} days.",
            report.deleted,
            policy.max_age_days()
        )));
        if report.failed > 0 {
            result.add_message(CmdMessage::warning(format!(
                "{} clip(s) could not be deleted and remain in the vault.",
                report.failed
            )));
        }
    }
    Ok(result.with_sweep(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShotType;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn sweeps_expired_clips_and_reports_the_count() {
        let mut store = StoreFixture::new()
            .with_aged_clip(ShotType::Derecha, 100, 31)
            .with_aged_clip(ShotType::Derecha, 100, 29)
            .store;

        let result = run(&mut store, &RetentionPolicy::new(30)).unwrap();
        let report = result.sweep.unwrap();
        assert_eq!(report.deleted, 1);
        assert_eq!(store.list_media(None).unwrap().len(), 1);
    }

    #[test]
    fn quiet_sweep_is_reported_as_such() {
        let mut store = StoreFixture::new().store;
        let result = run(&mut store, &RetentionPolicy::new(30)).unwrap();
        assert_eq!(result.sweep.unwrap().deleted, 0);
        assert_eq!(result.messages.len(), 1);
    }
}
