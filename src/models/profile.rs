// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Biometric profile with derived BMI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored biometric profile, one per user. BMI is derived on read and never
/// stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub age: Option<i64>,
    pub gender: Option<String>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub activity_level: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// BMI rounded to one decimal, when both height and weight are known.
    pub fn bmi(&self) -> Option<f64> {
        match (self.height, self.weight) {
            (Some(height), Some(weight)) if height > 0.0 => {
                let meters = height / 100.0;
                Some((weight / (meters * meters) * 10.0).round() / 10.0)
            }
            _ => None,
        }
    }
}

/// Profile upsert payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileInput {
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub activity_level: Option<String>,
}
