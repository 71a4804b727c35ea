// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily step count ledger routes.

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

const METRIC: CounterMetric = CounterMetric::Steps;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/steps/today", get(get_today))
        .route("/api/steps/add", post(add_steps))
        .route("/api/steps/goal", post(set_goal))
}

#[derive(Serialize)]
pub struct StepsResponse {
    pub steps: i64,
    pub goal: i64,
}

impl From<CounterTotals> for StepsResponse {
    fn from(totals: CounterTotals) -> Self {
        Self {
            steps: totals.value,
            goal: totals.goal,
        }
    }
}

/// Today's step count and goal. Never creates a row.
async fn get_today(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<StepsResponse>> {
    let day = current_day();
    let totals = state
        .db
        .counter_today(user.user_id, &day, METRIC)
        .await?
        .unwrap_or_else(|| CounterTotals::absent(METRIC));

    Ok(Json(totals.into()))
}

#[derive(Deserialize)]
struct AddStepsRequest {
    /// Steps to add; defaults to 500 when omitted. Accepted as-is, the
    /// caller owns the sign.
    steps: Option<i64>,
}

async fn add_steps(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<AddStepsRequest>,
) -> Result<Json<StepsResponse>> {
    let delta = body.steps.unwrap_or(METRIC.default_increment());
    let day = current_day();

    tracing::debug!(user_id = user.user_id, delta, "Adding steps");

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
) -> Result<Json<StepsResponse>> {
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
