// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard snapshot assembled from the three daily ledgers.

use serde::Serialize;

use crate::models::ledger::{percent, CounterTotals, ExerciseTotals};

/// Progress block for a single-value metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricBlock {
    pub count: i64,
    pub goal: i64,
    pub percent: f64,
}

impl From<CounterTotals> for MetricBlock {
    fn from(totals: CounterTotals) -> Self {
        Self {
            count: totals.value,
            goal: totals.goal,
            percent: percent(totals.value, totals.goal),
        }
    }
}

/// Progress block for the exercise summary; minutes drive the percent,
/// calories ride along.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseBlock {
    pub count: i64,
    pub goal: i64,
    pub percent: f64,
    pub calories: i64,
}

impl From<ExerciseTotals> for ExerciseBlock {
    fn from(totals: ExerciseTotals) -> Self {
        Self {
            count: totals.minutes,
            goal: totals.goal,
            percent: percent(totals.minutes, totals.goal),
            calories: totals.calories,
        }
    }
}

/// Unified "today" view. `overall` is the unweighted mean of the three
/// percents, recomputed on every call and never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub water: MetricBlock,
    pub steps: MetricBlock,
    pub exercise: ExerciseBlock,
    pub overall: f64,
    pub date: String,
}

impl DashboardSnapshot {
    pub fn new(
        water: CounterTotals,
        steps: CounterTotals,
        exercise: ExerciseTotals,
        date: String,
    ) -> Self {
        let water = MetricBlock::from(water);
        let steps = MetricBlock::from(steps);
        let exercise = ExerciseBlock::from(exercise);
        let overall = (water.percent + steps.percent + exercise.percent) / 3.0;

        Self {
            water,
            steps,
            exercise,
            overall,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ledger::CounterMetric;

    #[test]
    fn test_snapshot_for_untouched_day_is_all_zero() {
        let snapshot = DashboardSnapshot::new(
            CounterTotals::absent(CounterMetric::Water),
            CounterTotals::absent(CounterMetric::Steps),
            ExerciseTotals::default(),
            "2024-03-07".to_string(),
        );

        assert_eq!(snapshot.water.count, 0);
        assert_eq!(snapshot.water.goal, 8);
        assert_eq!(snapshot.water.percent, 0.0);
        assert_eq!(snapshot.steps.goal, 10000);
        assert_eq!(snapshot.exercise.goal, 30);
        assert_eq!(snapshot.exercise.calories, 0);
        assert_eq!(snapshot.overall, 0.0);
    }

    #[test]
    fn test_overall_is_unweighted_mean() {
        let snapshot = DashboardSnapshot::new(
            CounterTotals { value: 4, goal: 8 },
            CounterTotals {
                value: 5000,
                goal: 10000,
            },
            ExerciseTotals {
                minutes: 15,
                calories: 120,
                goal: 30,
            },
            "2024-03-07".to_string(),
        );

        assert_eq!(snapshot.overall, 0.5);
    }
}
