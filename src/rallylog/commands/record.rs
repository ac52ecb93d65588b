use crate::analytics::ProgressAnalytics;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ScoreRecord;
use crate::store::MediaStore;
use uuid::Uuid;

/// Finalize one analysis result: attach the comparison verdict, fold it
/// into the aggregates, and optionally back-reference the clip it scored.
pub fn run<S: MediaStore>(
    store: &mut S,
    analytics: &mut ProgressAnalytics,
    record: ScoreRecord,
    media_id: Option<Uuid>,
) -> Result<CmdResult> {
    let stored = analytics.record(record);

    if let Some(media_id) = media_id {
        store.attach_score(&media_id, stored.id)?;
    }

    let mut result = CmdResult::default();
    match &stored.comparison {
        Some(comparison) => result.add_message(CmdMessage::success(format!(
            "Recorded {} for {} on {}: {:+.2}% vs previous ({}), trend {}",
            stored.overall_score,
            stored.user_id,
            stored.shot_type,
            comparison.improvement_percent,
            comparison.previous_score,
            comparison.trend
        ))),
        None => result.add_message(CmdMessage::success(format!(
            "Recorded {} for {} on {} (first score for this shot)",
            stored.overall_score, stored.user_id, stored.shot_type
        ))),
    }
    Ok(result.with_score(stored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ShotType, SubScores, Trend};
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn score(overall: u8) -> ScoreRecord {
        ScoreRecord::new("ana", ShotType::Derecha, overall, SubScores::default()).unwrap()
    }

    #[test]
    fn first_record_has_no_comparison() {
        let mut store = InMemoryStore::new();
        let mut analytics = ProgressAnalytics::new();

        let result = run(&mut store, &mut analytics, score(70), None).unwrap();
        assert!(result.score.unwrap().comparison.is_none());
    }

    #[test]
    fn third_record_carries_a_trend_verdict() {
        let mut store = InMemoryStore::new();
        let mut analytics = ProgressAnalytics::new();

        run(&mut store, &mut analytics, score(70), None).unwrap();
        run(&mut store, &mut analytics, score(74), None).unwrap();
        let result = run(&mut store, &mut analytics, score(76), None).unwrap();

        let comparison = result.score.unwrap().comparison.unwrap();
        assert_eq!(comparison.previous_score, 74);
        assert_eq!(comparison.trend, Trend::Improving);
    }

    #[test]
    fn back_references_the_scored_clip() {
        let mut store = StoreFixture::new().with_clip(ShotType::Derecha, 100).store;
        let media_id = store.list_media(None).unwrap()[0].id;
        let mut analytics = ProgressAnalytics::new();

        let result = run(&mut store, &mut analytics, score(80), Some(media_id)).unwrap();
        let score_id = result.score.unwrap().id;

        assert_eq!(
            store.get_media(&media_id).unwrap().score_record_id,
            Some(score_id)
        );
    }

    #[test]
    fn unknown_clip_id_is_an_error_and_the_score_still_lands() {
        let mut store = InMemoryStore::new();
        let mut analytics = ProgressAnalytics::new();

        let err = run(&mut store, &mut analytics, score(80), Some(Uuid::new_v4()));
        assert!(err.is_err());
        // Appended before the attach failed; history is append-only.
        assert_eq!(analytics.history_for("ana", ShotType::Derecha).len(), 1);
    }
}
