// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard aggregator: the day's three ledgers fanned out concurrently
//! and joined into one snapshot.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{CounterMetric, CounterTotals, DashboardSnapshot};
use crate::time_utils::current_day;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on the three-way fan-out. The reads have no per-branch
/// ordering requirement but the join is all-or-nothing: a snapshot missing a
/// component would be misleading, so any failure fails the whole call.
const SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(5);

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/dashboard/today", get(today_snapshot))
}

async fn today_snapshot(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DashboardSnapshot>> {
    let day = current_day();

    let reads = async {
        tokio::try_join!(
            state.db.counter_today(user.user_id, &day, CounterMetric::Water),
            state.db.counter_today(user.user_id, &day, CounterMetric::Steps),
            state.db.exercise_today(user.user_id, &day),
        )
    };

    let (water, steps, exercise) = tokio::time::timeout(SNAPSHOT_TIMEOUT, reads)
        .await
        .map_err(|_| AppError::Database("Dashboard snapshot timed out".to_string()))??;

    let snapshot = DashboardSnapshot::new(
        water.unwrap_or_else(|| CounterTotals::absent(CounterMetric::Water)),
        steps.unwrap_or_else(|| CounterTotals::absent(CounterMetric::Steps)),
        exercise.unwrap_or_default(),
        day,
    );

    Ok(Json(snapshot))
}
