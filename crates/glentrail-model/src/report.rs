use crate::ids::{ParseError, ReportId, UserId, WalkId};
use crate::walk::{validate_text, Difficulty, TITLE_MAX_LEN};
use serde::{Deserialize, Serialize};

pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

/// A member's trip report for a walk. Reports are drafts until published;
/// only published reports are readable and only published reports count
/// toward the walk's rating aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WalkReport {
    pub id: ReportId,
    pub walk_id: WalkId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub rating: u8,
    pub completed_at: i64,
    pub weather_conditions: Option<String>,
    pub trail_conditions: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub actual_time_hours: Option<f64>,
    pub is_published: bool,
    pub published_at: Option<i64>,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NewReport {
    pub walk_id: WalkId,
    pub title: String,
    pub content: String,
    pub rating: u8,
    #[serde(default)]
    pub completed_at: Option<i64>,
    #[serde(default)]
    pub weather_conditions: Option<String>,
    #[serde(default)]
    pub trail_conditions: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub actual_time_hours: Option<f64>,
}

impl NewReport {
    pub fn validate(&self) -> Result<(), ParseError> {
        validate_text("report title", &self.title, TITLE_MAX_LEN)?;
        if self.content.trim().is_empty() {
            return Err(ParseError::Empty("report content"));
        }
        if !(RATING_MIN..=RATING_MAX).contains(&self.rating) {
            return Err(ParseError::OutOfRange("rating must be within [1, 5]"));
        }
        if let Some(hours) = self.actual_time_hours {
            if !hours.is_finite() || hours <= 0.0 {
                return Err(ParseError::OutOfRange("actual_time_hours must be positive"));
            }
        }
        Ok(())
    }
}

/// Mean of published ratings rounded to one decimal place, the precision the
/// catalog displays.
#[must_use]
pub fn round_rating(mean: f64) -> f64 {
    (mean * 10.0).round() / 10.0
}
