//! Record-time comparison against the previous score of the same shot type.

use crate::analytics::classify_trend;
use crate::model::{Comparison, ScoreRecord};

/// Compare `current` against the prior history of its (user, shot type)
/// key, oldest first. Returns `None` for the first-ever record.
///
/// The improvement percentage is relative to the previous overall score,
/// rounded to two decimal places. A previous score of 0 makes the division
/// undefined; the verdict substitutes 0.0 so the field stays total instead
/// of going NaN/infinite.
pub fn compare(current: &ScoreRecord, history: &[ScoreRecord]) -> Option<Comparison> {
    let previous = history.last()?;

    let improvement_percent = if previous.overall_score == 0 {
        0.0
    } else {
        let raw = (current.overall_score as f64 - previous.overall_score as f64)
            / previous.overall_score as f64
            * 100.0;
        round2(raw)
    };

    let mut scores: Vec<u8> = history.iter().map(|r| r.overall_score).collect();
    scores.push(current.overall_score);

    Some(Comparison {
        previous_score: previous.overall_score,
        improvement_percent,
        trend: classify_trend(&scores),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ShotType, SubScores, Trend};

    fn score(overall: u8) -> ScoreRecord {
        ScoreRecord::new("ana", ShotType::Derecha, overall, SubScores::default()).unwrap()
    }

    #[test]
    fn no_history_means_no_comparison() {
        assert!(compare(&score(90), &[]).is_none());
    }

    #[test]
    fn improvement_percent_is_rounded_to_two_decimals() {
        // (80 - 70) / 70 * 100 = 14.2857...
        let comparison = compare(&score(80), &[score(70)]).unwrap();
        assert_eq!(comparison.previous_score, 70);
        assert_eq!(comparison.improvement_percent, 14.29);
    }

    #[test]
    fn decline_yields_a_negative_percent() {
        let comparison = compare(&score(60), &[score(80)]).unwrap();
        assert_eq!(comparison.improvement_percent, -25.0);
    }

    #[test]
    fn zero_previous_score_substitutes_zero() {
        let comparison = compare(&score(90), &[score(0)]).unwrap();
        assert_eq!(comparison.improvement_percent, 0.0);
        assert!(comparison.improvement_percent.is_finite());
    }

    #[test]
    fn trend_is_stable_with_fewer_than_three_records() {
        let comparison = compare(&score(90), &[score(40)]).unwrap();
        assert_eq!(comparison.trend, Trend::Stable);
    }

    #[test]
    fn trend_uses_previous_and_current_in_the_window() {
        // History [70, 74], current 76: window is [70, 74, 76], delta +6.
        let comparison = compare(&score(76), &[score(70), score(74)]).unwrap();
        assert_eq!(comparison.trend, Trend::Improving);

        // Window [70, 74, 75], delta exactly +5: stable.
        let comparison = compare(&score(75), &[score(70), score(74)]).unwrap();
        assert_eq!(comparison.trend, Trend::Stable);

        // Window [80, 76, 74], delta -6: declining.
        let comparison = compare(&score(74), &[score(80), score(76)]).unwrap();
        assert_eq!(comparison.trend, Trend::Declining);
    }
}
