// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-metric per-user-per-day accumulator records.
//!
//! Every tracked metric follows the same protocol: the first write of a day
//! creates the row seeded with the delta and the metric's default goal,
//! later writes accumulate, and a bare read never creates anything. Rows are
//! never deleted; the next calendar day simply starts a fresh one.

use serde::Serialize;
use sqlx::FromRow;

/// Single-value counter metrics (water glasses, step counts).
///
/// The exercise summary carries two accumulators (minutes + calories) and is
/// handled separately in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMetric {
    Water,
    Steps,
}

impl CounterMetric {
    /// Backing table.
    pub fn table(&self) -> &'static str {
        match self {
            CounterMetric::Water => crate::db::tables::WATER_LOGS,
            CounterMetric::Steps => crate::db::tables::STEP_LOGS,
        }
    }

    /// Accumulator column within the backing table.
    pub fn value_column(&self) -> &'static str {
        match self {
            CounterMetric::Water => "count",
            CounterMetric::Steps => "steps",
        }
    }

    /// Goal seeded on first write and substituted for invalid goal input.
    pub fn default_goal(&self) -> i64 {
        match self {
            CounterMetric::Water => 8,
            CounterMetric::Steps => 10000,
        }
    }

    /// Increment substituted when the request body omits one.
    pub fn default_increment(&self) -> i64 {
        match self {
            CounterMetric::Water => 1,
            CounterMetric::Steps => 500,
        }
    }

    /// Water never stores a negative net count; steps accumulate whatever
    /// the caller sends.
    pub fn floors_at_zero(&self) -> bool {
        matches!(self, CounterMetric::Water)
    }
}

/// Accumulated value and goal for a counter metric's day row.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct CounterTotals {
    pub value: i64,
    pub goal: i64,
}

impl CounterTotals {
    /// Defaults returned for a day with no row yet.
    pub fn absent(metric: CounterMetric) -> Self {
        Self {
            value: 0,
            goal: metric.default_goal(),
        }
    }
}

/// Default goal for the exercise summary (minutes).
pub const DEFAULT_EXERCISE_GOAL: i64 = 30;

/// Accumulated exercise summary for one day.
#[derive(Debug, Clone, Copy, Serialize, FromRow)]
pub struct ExerciseTotals {
    pub minutes: i64,
    pub calories: i64,
    pub goal: i64,
}

impl Default for ExerciseTotals {
    fn default() -> Self {
        Self {
            minutes: 0,
            calories: 0,
            goal: DEFAULT_EXERCISE_GOAL,
        }
    }
}

/// Progress toward a goal. Not clamped: overshooting the goal reads as
/// more than 1.0, consistently for every metric and the overall score.
pub fn percent(value: i64, goal: i64) -> f64 {
    if goal > 0 {
        value as f64 / goal as f64
    } else {
        0.0
    }
}
