//! Time-bucketed activity series for the profile dashboard chart.

use glentrail_core::time::{utc_date_string, utc_week_start_string};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityRange {
    Week,
    Month,
    #[serde(rename = "3months")]
    Months3,
    #[default]
    #[serde(rename = "6months")]
    Months6,
    Year,
}

impl ActivityRange {
    pub fn parse(raw: &str) -> Result<Self, crate::PipelineError> {
        match raw.to_ascii_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "3months" => Ok(Self::Months3),
            "6months" => Ok(Self::Months6),
            "year" => Ok(Self::Year),
            other => Err(crate::PipelineError(format!(
                "unknown activity range '{other}'; expected one of week, month, 3months, 6months, year"
            ))),
        }
    }

    #[must_use]
    pub const fn window_days(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Months3 => 90,
            Self::Months6 => 180,
            Self::Year => 365,
        }
    }

    #[must_use]
    pub const fn window_ms(self) -> i64 {
        self.window_days() * 86_400_000
    }

    /// Short ranges bucket per day; longer ones per week to keep the series
    /// readable.
    #[must_use]
    pub const fn is_daily(self) -> bool {
        matches!(self, Self::Week | Self::Month)
    }
}

/// One qualifying completion, already joined with its walk: the distance is
/// the walk's, the time is the reported actual time or the walk's estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ActivityEntry {
    pub completed_at: i64,
    pub distance_km: f64,
    pub time_hours: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityBucket {
    /// Bucket key: the UTC day, or the UTC date of the week's Sunday.
    pub date: String,
    pub walks: i64,
    pub distance_km: f64,
    pub time_hours: f64,
}

/// Groups entries inside the range's window ending at `now_ms` into
/// chronologically ordered buckets. Entries outside the window are ignored.
#[must_use]
pub fn bucket_entries(
    entries: &[ActivityEntry],
    range: ActivityRange,
    now_ms: i64,
) -> Vec<ActivityBucket> {
    let start = now_ms - range.window_ms();
    let mut buckets: BTreeMap<String, ActivityBucket> = BTreeMap::new();

    for entry in entries {
        if entry.completed_at < start || entry.completed_at > now_ms {
            continue;
        }
        let key = if range.is_daily() {
            utc_date_string(entry.completed_at)
        } else {
            utc_week_start_string(entry.completed_at)
        };
        let bucket = buckets.entry(key.clone()).or_insert_with(|| ActivityBucket {
            date: key,
            walks: 0,
            distance_km: 0.0,
            time_hours: 0.0,
        });
        bucket.walks += 1;
        bucket.distance_km += entry.distance_km;
        bucket.time_hours += entry.time_hours;
    }

    // BTreeMap iteration is by key, and YYYY-MM-DD keys order chronologically.
    buckets.into_values().collect()
}
