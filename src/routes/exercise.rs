// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise routes: daily summary, append-only detail log, weekly rollup.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::ledger::DEFAULT_EXERCISE_GOAL;
use crate::models::{ExerciseEntry, ExerciseTotals, WeeklyStats};
use crate::time_utils::{current_day, week_window};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const DEFAULT_MINUTES: i64 = 5;
const DEFAULT_CALORIES: i64 = 20;
const DEFAULT_TYPE: &str = "Cardio";
const DEFAULT_ACTIVITY: &str = "Exercise";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/exercise/today", get(get_today))
        .route("/api/exercise/add", post(add_exercise))
        .route("/api/exercise/goal", post(set_goal))
        .route("/api/exercise/stats/weekly", get(weekly_stats))
}

#[derive(Serialize)]
pub struct ExerciseTodayResponse {
    pub minutes: i64,
    pub calories: i64,
    pub goal: i64,
    pub list: Vec<ExerciseEntry>,
}

/// Today's exercise summary plus the day's entries, newest first.
///
/// The summary is authoritative; the detail listing is best-effort and
/// degrades to an empty list rather than failing the read.
async fn get_today(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ExerciseTodayResponse>> {
    let day = current_day();

    let totals = state
        .db
        .exercise_today(user.user_id, &day)
        .await?
        .unwrap_or_default();

    let list = match state.db.exercise_entries_for_day(user.user_id, &day).await {
        Ok(list) => list,
        Err(err) => {
            tracing::warn!(error = %err, "Exercise detail listing unavailable");
            Vec::new()
        }
    };

    Ok(Json(ExerciseTodayResponse {
        minutes: totals.minutes,
        calories: totals.calories,
        goal: totals.goal,
        list,
    }))
}

#[derive(Deserialize)]
struct AddExerciseRequest {
    #[serde(rename = "type")]
    entry_type: Option<String>,
    activity: Option<String>,
    minutes: Option<i64>,
    calories: Option<i64>,
}

/// Append one exercise entry. Missing fields are substituted with defaults,
/// never rejected.
async fn add_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<AddExerciseRequest>,
) -> Result<Json<ExerciseTotals>> {
    let now = chrono::Utc::now();
    let day = crate::time_utils::day_key(now);

    let entry_type = body
        .entry_type
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_TYPE.to_string());
    let activity = body
        .activity
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_ACTIVITY.to_string());
    let minutes = body.minutes.unwrap_or(DEFAULT_MINUTES);
    let calories = body.calories.unwrap_or(DEFAULT_CALORIES);

    tracing::debug!(
        user_id = user.user_id,
        %entry_type,
        minutes,
        calories,
        "Adding exercise entry"
    );

    let totals = state
        .db
        .add_exercise_entry(user.user_id, &day, &entry_type, &activity, minutes, calories, now)
        .await?;

    Ok(Json(totals))
}

#[derive(Deserialize)]
struct GoalRequest {
    goal: Option<i64>,
}

async fn set_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<GoalRequest>,
) -> Result<Json<ExerciseTotals>> {
    let goal = match body.goal {
        Some(g) if g > 0 => g,
        _ => DEFAULT_EXERCISE_GOAL,
    };
    let day = current_day();

    let totals = state.db.exercise_set_goal(user.user_id, &day, goal).await?;
    Ok(Json(totals))
}

#[derive(Deserialize)]
struct WeeklyQuery {
    /// Whole weeks back from the current week; 0 (default) is this week.
    #[serde(default)]
    week_offset: i64,
}

/// Monday-aligned 7-day rollup of exercise entries.
async fn weekly_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<WeeklyQuery>,
) -> Result<Json<WeeklyStats>> {
    if params.week_offset < 0 {
        return Err(AppError::BadRequest(
            "week_offset must be a non-negative integer".to_string(),
        ));
    }

    let (start, end) = week_window(chrono::Utc::now(), params.week_offset as u32);

    let entries = state
        .db
        .exercise_entries_between(user.user_id, start, end)
        .await?;

    Ok(Json(WeeklyStats::build(start, end, &entries)))
}
