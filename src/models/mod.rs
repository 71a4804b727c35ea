// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod dashboard;
pub mod exercise;
pub mod food;
pub mod ledger;
pub mod profile;

pub use dashboard::{DashboardSnapshot, ExerciseBlock, MetricBlock};
pub use exercise::{ExerciseEntry, WeeklyDay, WeeklyStats, WeeklySummary};
pub use food::{FoodLog, FoodTotals, NutritionEstimate};
pub use ledger::{CounterMetric, CounterTotals, ExerciseTotals};
pub use profile::{Profile, ProfileInput};
