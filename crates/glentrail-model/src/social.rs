use crate::ids::{ParseError, UserId, WalkId};
use crate::walk::PeakCategory;
use serde::{Deserialize, Serialize};

/// What a like points at. Wire values are lowercase and appear in API paths.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum LikeTargetType {
    Walk,
    Report,
}

impl LikeTargetType {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw.to_ascii_lowercase().as_str() {
            "walk" => Ok(Self::Walk),
            "report" => Ok(Self::Report),
            _ => Err(ParseError::InvalidFormat(
                "target type must be one of walk, report",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Report => "report",
        }
    }
}

/// A like row. Identity is the (user, target type, target id) triple; the
/// row's presence is the like, toggling inserts or deletes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Like {
    pub user_id: UserId,
    pub target_type: LikeTargetType,
    pub target_id: i64,
    pub liked_at: i64,
}

/// A logged walk completion, recorded with the values actually credited to
/// the user's stats. `completed_day` is the UTC calendar date used for
/// same-day duplicate detection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Completion {
    pub user_id: UserId,
    pub walk_id: WalkId,
    pub completed_at: i64,
    pub completed_day: String,
    pub distance_km: f64,
    pub ascent_m: i64,
    pub time_hours: f64,
    pub category: Option<PeakCategory>,
}

/// Caller-supplied completion fields. Absent values default from the walk:
/// distance and ascent from the walk record, time from its estimate, and the
/// peak category from the walk's tags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompletionInput {
    pub walk_id: WalkId,
    #[serde(default)]
    pub completed_at: Option<i64>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub ascent_m: Option<i64>,
    #[serde(default)]
    pub time_hours: Option<f64>,
    #[serde(default)]
    pub category: Option<PeakCategory>,
}

impl CompletionInput {
    pub fn validate(&self) -> Result<(), ParseError> {
        if let Some(distance) = self.distance_km {
            if !distance.is_finite() || distance < 0.0 {
                return Err(ParseError::OutOfRange("distance_km must not be negative"));
            }
        }
        if let Some(ascent) = self.ascent_m {
            if ascent < 0 {
                return Err(ParseError::OutOfRange("ascent_m must not be negative"));
            }
        }
        if let Some(hours) = self.time_hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(ParseError::OutOfRange("time_hours must not be negative"));
            }
        }
        if let Some(at) = self.completed_at {
            if at < 0 {
                return Err(ParseError::OutOfRange("completed_at must not be negative"));
            }
        }
        Ok(())
    }
}
