use crate::error::{RallyError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// The seven stroke categories tracked by the log. Court names are kept in
/// Spanish as the product uses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    Derecha,
    Reves,
    VoleaDerecha,
    VoleaReves,
    Bandeja,
    Remate,
    Saque,
}

impl ShotType {
    pub const ALL: [ShotType; 7] = [
        ShotType::Derecha,
        ShotType::Reves,
        ShotType::VoleaDerecha,
        ShotType::VoleaReves,
        ShotType::Bandeja,
        ShotType::Remate,
        ShotType::Saque,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotType::Derecha => "derecha",
            ShotType::Reves => "reves",
            ShotType::VoleaDerecha => "volea_derecha",
            ShotType::VoleaReves => "volea_reves",
            ShotType::Bandeja => "bandeja",
            ShotType::Remate => "remate",
            ShotType::Saque => "saque",
        }
    }
}

impl std::fmt::Display for ShotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ShotType {
    type Err = RallyError;

    fn from_str(s: &str) -> Result<Self> {
        ShotType::ALL
            .into_iter()
            .find(|shot| shot.as_str() == s)
            .ok_or_else(|| RallyError::Api(format!("Unknown shot type: {}", s)))
    }
}

/// Capture metadata handed over by the recording UI alongside the raw file.
#[derive(Debug, Clone)]
pub struct CaptureMeta {
    pub shot_type: ShotType,
    pub captured_at: DateTime<Utc>,
    pub duration_seconds: f64,
    // Advisory only; the store records the byte count it actually copied.
    pub size_bytes: u64,
}

impl CaptureMeta {
    pub fn new(shot_type: ShotType, duration_seconds: f64, size_bytes: u64) -> Self {
        Self {
            shot_type,
            captured_at: Utc::now(),
            duration_seconds,
            size_bytes,
        }
    }
}

/// One stored clip. Immutable apart from the score back-reference, which is
/// attached once when analysis completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: Uuid,
    pub shot_type: ShotType,
    pub storage_path: PathBuf,
    pub captured_at: DateTime<Utc>,
    pub duration_seconds: f64,
    pub size_bytes: u64,
    pub score_record_id: Option<Uuid>,
}

impl MediaFile {
    /// The id is generated by the store before the destination path is
    /// derived from it, so it is taken here rather than minted internally.
    pub fn new(id: Uuid, meta: &CaptureMeta, storage_path: PathBuf, size_bytes: u64) -> Self {
        Self {
            id,
            shot_type: meta.shot_type,
            storage_path,
            captured_at: meta.captured_at,
            duration_seconds: meta.duration_seconds,
            size_bytes,
            score_record_id: None,
        }
    }
}

/// Three-way classification of recent score movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Declining => "declining",
        };
        write!(f, "{}", s)
    }
}

/// Verdict against the previous record of the same shot type, computed once
/// at record time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub previous_score: u8,
    pub improvement_percent: f64,
    pub trend: Trend,
}

/// One completed analysis result for one shot type, owned by one user.
/// Append-only; never mutated after the comparison is attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: Uuid,
    pub user_id: String,
    pub shot_type: ShotType,
    pub overall_score: u8,
    pub posture: Option<u8>,
    pub timing: Option<u8>,
    pub follow_through: Option<u8>,
    pub power: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub comparison: Option<Comparison>,
}

/// The four optional sub-scores as delivered by the analysis producer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubScores {
    pub posture: Option<u8>,
    pub timing: Option<u8>,
    pub follow_through: Option<u8>,
    pub power: Option<u8>,
}

fn check_score(field: &'static str, value: u8) -> Result<u8> {
    if value > 100 {
        return Err(RallyError::ScoreOutOfRange {
            field,
            value: value as u16,
        });
    }
    Ok(value)
}

fn check_optional(field: &'static str, value: Option<u8>) -> Result<Option<u8>> {
    value.map(|v| check_score(field, v)).transpose()
}

impl ScoreRecord {
    /// Validates all scores at the boundary. Extra fields from an external
    /// producer are simply never carried this far; missing sub-scores are
    /// allowed, out-of-range ones are not.
    pub fn new(
        user_id: impl Into<String>,
        shot_type: ShotType,
        overall_score: u8,
        subs: SubScores,
    ) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            shot_type,
            overall_score: check_score("overall_score", overall_score)?,
            posture: check_optional("posture", subs.posture)?,
            timing: check_optional("timing", subs.timing)?,
            follow_through: check_optional("follow_through", subs.follow_through)?,
            power: check_optional("power", subs.power)?,
            created_at: Utc::now(),
            comparison: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn shot_type_round_trips_through_str() {
        for shot in ShotType::ALL {
            assert_eq!(ShotType::from_str(shot.as_str()).unwrap(), shot);
        }
        assert!(ShotType::from_str("globo").is_err());
    }

    #[test]
    fn score_record_rejects_out_of_range() {
        let err = ScoreRecord::new("ana", ShotType::Derecha, 101, SubScores::default());
        assert!(matches!(
            err,
            Err(RallyError::ScoreOutOfRange {
                field: "overall_score",
                value: 101
            })
        ));

        let subs = SubScores {
            timing: Some(140),
            ..SubScores::default()
        };
        assert!(ScoreRecord::new("ana", ShotType::Derecha, 80, subs).is_err());
    }

    #[test]
    fn score_record_accepts_bounds_and_missing_subs() {
        let subs = SubScores {
            posture: Some(0),
            power: Some(100),
            ..SubScores::default()
        };
        let record = ScoreRecord::new("ana", ShotType::Saque, 100, subs).unwrap();
        assert_eq!(record.overall_score, 100);
        assert_eq!(record.posture, Some(0));
        assert_eq!(record.timing, None);
        assert!(record.comparison.is_none());
    }

    #[test]
    fn score_record_tolerates_unknown_fields_on_deserialize() {
        let json = r#"{
            "id": "7b9c5e7e-46a3-4a83-9f8b-2f2f45f0b001",
            "user_id": "ana",
            "shot_type": "bandeja",
            "overall_score": 72,
            "posture": null,
            "timing": 70,
            "follow_through": null,
            "power": null,
            "created_at": "2026-03-01T10:00:00Z",
            "comparison": null,
            "model_version": "mock-1",
            "confidence": 0.93
        }"#;
        let record: ScoreRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.shot_type, ShotType::Bandeja);
        assert_eq!(record.timing, Some(70));
    }
}
