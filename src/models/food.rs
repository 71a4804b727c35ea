// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Food log entries and nutrition estimates from the inference service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Structured nutrition estimate parsed from the inference reply.
///
/// The reply is untrusted text, so optional fields default rather than fail;
/// `food_name` and `calories` are the required core (the parse is rejected
/// without them).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionEstimate {
    pub food_name: String,
    #[serde(default)]
    pub description: String,
    pub calories: i64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
}

/// One logged food item.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FoodLog {
    pub id: i64,
    pub day: String,
    pub food_name: String,
    pub description: String,
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub meal_type: String,
    pub created_at: DateTime<Utc>,
}

/// Daily macro totals across food logs.
#[derive(Debug, Clone, Serialize)]
pub struct FoodTotals {
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl FoodTotals {
    pub fn from_logs(logs: &[FoodLog]) -> Self {
        Self {
            calories: logs.iter().map(|l| l.calories).sum(),
            protein: round1(logs.iter().map(|l| l.protein).sum()),
            carbs: round1(logs.iter().map(|l| l.carbs).sum()),
            fat: round1(logs.iter().map(|l| l.fat).sum()),
        }
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
