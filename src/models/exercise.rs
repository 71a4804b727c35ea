// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise detail entries and the weekly rollup.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::time_utils::weekday_name;

/// One immutable exercise session, appended on every add.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ExerciseEntry {
    pub id: i64,
    pub day: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub entry_type: String,
    pub activity: String,
    pub minutes: i64,
    pub calories: i64,
    pub created_at: DateTime<Utc>,
}

/// One day bucket of the weekly rollup. Days without entries are zero-filled
/// so callers can always index bucket[i] for weekday i.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyDay {
    pub date: String,
    pub weekday: &'static str,
    pub minutes: i64,
    pub calories: i64,
    pub entries: u32,
}

/// Aggregates across the whole 7-day window.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklySummary {
    pub minutes: i64,
    pub calories: i64,
    pub entries: u32,
    /// `round(total calories / 7)`
    pub avg_calories_per_day: i64,
    /// Days with at least one entry
    pub active_days: u32,
}

/// Weekly exercise stats response.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyStats {
    pub start_date: String,
    pub end_date: String,
    pub summary: WeeklySummary,
    pub days: Vec<WeeklyDay>,
}

impl WeeklyStats {
    /// Fold entries from the Monday-aligned window into exactly 7 buckets,
    /// Monday first. Entries outside the window are ignored.
    pub fn build(start: NaiveDate, end: NaiveDate, entries: &[ExerciseEntry]) -> Self {
        let mut days: Vec<WeeklyDay> = (0..7)
            .map(|i| {
                let date = start + Duration::days(i);
                WeeklyDay {
                    date: date.format("%Y-%m-%d").to_string(),
                    weekday: weekday_name(date),
                    minutes: 0,
                    calories: 0,
                    entries: 0,
                }
            })
            .collect();

        for entry in entries {
            if let Some(bucket) = days.iter_mut().find(|d| d.date == entry.day) {
                bucket.minutes += entry.minutes;
                bucket.calories += entry.calories;
                bucket.entries += 1;
            }
        }

        let minutes = days.iter().map(|d| d.minutes).sum();
        let calories: i64 = days.iter().map(|d| d.calories).sum();
        let entry_count = days.iter().map(|d| d.entries).sum();
        let active_days = days.iter().filter(|d| d.entries > 0).count() as u32;

        Self {
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
            summary: WeeklySummary {
                minutes,
                calories,
                entries: entry_count,
                avg_calories_per_day: (calories as f64 / 7.0).round() as i64,
                active_days,
            },
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry(id: i64, day: &str, minutes: i64, calories: i64) -> ExerciseEntry {
        ExerciseEntry {
            id,
            day: day.to_string(),
            entry_type: "Cardio".to_string(),
            activity: "Run".to_string(),
            minutes,
            calories,
            created_at: Utc::now(),
        }
    }

    fn window() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        )
    }

    #[test]
    fn test_empty_week_is_zero_filled() {
        let (start, end) = window();
        let stats = WeeklyStats::build(start, end, &[]);

        assert_eq!(stats.days.len(), 7);
        assert_eq!(stats.days[0].weekday, "Monday");
        assert_eq!(stats.days[6].weekday, "Sunday");
        assert!(stats.days.iter().all(|d| d.minutes == 0 && d.entries == 0));
        assert_eq!(stats.summary.minutes, 0);
        assert_eq!(stats.summary.avg_calories_per_day, 0);
        assert_eq!(stats.summary.active_days, 0);
    }

    #[test]
    fn test_entries_group_into_their_day() {
        let (start, end) = window();
        let entries = vec![
            make_entry(1, "2024-03-04", 30, 200),
            make_entry(2, "2024-03-04", 10, 100),
            make_entry(3, "2024-03-06", 20, 150),
        ];
        let stats = WeeklyStats::build(start, end, &entries);

        assert_eq!(stats.days[0].minutes, 40);
        assert_eq!(stats.days[0].entries, 2);
        assert_eq!(stats.days[2].calories, 150);
        assert_eq!(stats.days[1].entries, 0);
        assert_eq!(stats.summary.minutes, 60);
        assert_eq!(stats.summary.entries, 3);
        assert_eq!(stats.summary.active_days, 2);
        // 450 / 7 = 64.28.. rounds to 64
        assert_eq!(stats.summary.avg_calories_per_day, 64);
    }

    #[test]
    fn test_entries_outside_window_are_ignored() {
        let (start, end) = window();
        let entries = vec![make_entry(1, "2024-03-03", 30, 200)];
        let stats = WeeklyStats::build(start, end, &entries);

        assert_eq!(stats.summary.entries, 0);
    }
}
