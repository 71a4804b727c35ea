// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily water intake ledger routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{CounterMetric, CounterTotals};
use crate::time_utils::current_day;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const METRIC: CounterMetric = CounterMetric::Water;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/water/today", get(get_today))
        .route("/api/water/add", post(add_water))
        .route("/api/water/goal", post(set_goal))
}

#[derive(Serialize)]
pub struct WaterResponse {
    pub count: i64,
    pub goal: i64,
}

impl From<CounterTotals> for WaterResponse {
    fn from(totals: CounterTotals) -> Self {
        Self {
            count: totals.value,
            goal: totals.goal,
        }
    }
}

/// Today's water count and goal. Never creates a row.
async fn get_today(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<WaterResponse>> {
    let day = current_day();
    let totals = state
        .db
        .counter_today(user.user_id, &day, METRIC)
        .await?
        .unwrap_or_else(|| CounterTotals::absent(METRIC));

    Ok(Json(totals.into()))
}

#[derive(Deserialize)]
struct AddWaterRequest {
    /// Glasses to add; defaults to 1 when omitted. May be negative to undo,
    /// but the stored count never drops below 0.
    glasses: Option<i64>,
}

async fn add_water(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<AddWaterRequest>,
) -> Result<Json<WaterResponse>> {
    let delta = body.glasses.unwrap_or(METRIC.default_increment());
    let day = current_day();

    tracing::debug!(user_id = user.user_id, delta, "Adding water");

    let totals = state.db.counter_add(user.user_id, &day, METRIC, delta).await?;
    Ok(Json(totals.into()))
}

#[derive(Deserialize)]
struct GoalRequest {
    goal: Option<i64>,
}

async fn set_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<GoalRequest>,
) -> Result<Json<WaterResponse>> {
    // Non-positive or missing goals fall back to the metric default.
    let goal = match body.goal {
        Some(g) if g > 0 => g,
        _ => METRIC.default_goal(),
    };
    let day = current_day();

    let totals = state
        .db
        .counter_set_goal(user.user_id, &day, METRIC, goal)
        .await?;
    Ok(Json(totals.into()))
}
