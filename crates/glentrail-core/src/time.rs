use chrono::{DateTime, Datelike, Days, Utc};

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// UTC calendar date (`YYYY-MM-DD`) of a millisecond timestamp.
///
/// Out-of-range timestamps fall back to the epoch date rather than failing;
/// callers treat the result as a grouping key, not a parsed value.
#[must_use]
pub fn utc_date_string(timestamp_ms: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp_millis(timestamp_ms).unwrap_or(DateTime::UNIX_EPOCH);
    dt.format("%Y-%m-%d").to_string()
}

/// UTC date of the Sunday opening the week that contains the timestamp.
#[must_use]
pub fn utc_week_start_string(timestamp_ms: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp_millis(timestamp_ms).unwrap_or(DateTime::UNIX_EPOCH);
    let date = dt.date_naive();
    let offset = u64::from(date.weekday().num_days_from_sunday());
    let start = date.checked_sub_days(Days::new(offset)).unwrap_or(date);
    start.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::{utc_date_string, utc_week_start_string};
    use chrono::NaiveDate;

    fn ms_for(year: i32, month: u32, day: u32) -> i64 {
        NaiveDate::from_ymd_opt(year, month, day)
            .expect("valid date")
            .and_hms_opt(12, 30, 0)
            .expect("valid time")
            .and_utc()
            .timestamp_millis()
    }

    #[test]
    fn date_string_is_utc_calendar_day() {
        assert_eq!(utc_date_string(0), "1970-01-01");
        assert_eq!(utc_date_string(ms_for(2024, 6, 5)), "2024-06-05");
    }

    #[test]
    fn week_starts_on_sunday() {
        // 2024-06-05 is a Wednesday; its week opened on Sunday 2024-06-02.
        assert_eq!(utc_week_start_string(ms_for(2024, 6, 5)), "2024-06-02");
        // A Sunday is its own week start.
        assert_eq!(utc_week_start_string(ms_for(2024, 6, 2)), "2024-06-02");
    }

    #[test]
    fn now_is_after_build_era() {
        let now = super::now_ms();
        let floor = NaiveDate::from_ymd_opt(2024, 1, 1)
            .expect("valid date")
            .and_hms_opt(0, 0, 0)
            .expect("valid time")
            .and_utc()
            .timestamp_millis();
        assert!(now > floor, "clock reported {now}");
    }
}
