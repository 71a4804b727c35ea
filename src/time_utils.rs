// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Day key and week window helpers.
//!
//! All tracking is keyed by the calendar day in UTC, the reference time
//! zone for the whole system. Every function here is a pure function of its
//! arguments so tests can inject a fixed clock reading.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

/// Calendar-day key (`YYYY-MM-DD`) for a UTC instant.
pub fn day_key(now: DateTime<Utc>) -> String {
    now.date_naive().format("%Y-%m-%d").to_string()
}

/// Day key for "now".
pub fn current_day() -> String {
    day_key(Utc::now())
}

/// Monday..Sunday range of the week containing `now`, shifted back by
/// `offset_weeks` whole weeks. Monday is always the first day.
pub fn week_window(now: DateTime<Utc>, offset_weeks: u32) -> (NaiveDate, NaiveDate) {
    let today = now.date_naive();
    let monday = today
        - Duration::days(today.weekday().num_days_from_monday() as i64)
        - Duration::weeks(offset_weeks as i64);
    (monday, monday + Duration::days(6))
}

/// English display name for a weekday (rollup buckets).
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_day_key_drops_time_component() {
        assert_eq!(day_key(at(2024, 3, 7, 0)), "2024-03-07");
        assert_eq!(day_key(at(2024, 3, 7, 23)), "2024-03-07");
    }

    #[test]
    fn test_week_window_is_monday_aligned() {
        // 2024-03-07 is a Thursday
        let (start, end) = week_window(at(2024, 3, 7, 12), 0);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(start.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_week_window_on_monday_and_sunday() {
        // A Monday maps to itself
        let (start, _) = week_window(at(2024, 3, 4, 1), 0);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());

        // A Sunday still belongs to the week that started the previous Monday
        let (start, end) = week_window(at(2024, 3, 10, 23), 0);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn test_week_window_offset_shifts_whole_weeks() {
        let (start, end) = week_window(at(2024, 3, 7, 12), 2);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 19).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(
            weekday_name(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()),
            "Monday"
        );
        assert_eq!(
            weekday_name(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()),
            "Sunday"
        );
    }
}
