// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Food logging backed by the image-to-nutrition inference service.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{FoodLog, FoodTotals, NutritionEstimate};
use crate::time_utils::day_key;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Decoded image size cap (10 MiB).
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/food/analyze", post(analyze_food))
        .route("/api/food/today", get(get_today_food))
        .route("/api/food/{id}", delete(delete_food))
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    image_base64: String,
    meal_type: Option<String>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub analysis: NutritionEstimate,
    pub log: FoodLog,
}

/// Analyze a food photo and log the result for today.
async fn analyze_food(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    if body.image_base64.is_empty() {
        return Err(AppError::BadRequest("Image is required".to_string()));
    }

    // Reject garbage before paying for an inference round-trip.
    let decoded = STANDARD
        .decode(&body.image_base64)
        .map_err(|_| AppError::BadRequest("Image must be valid base64".to_string()))?;
    if decoded.len() > MAX_IMAGE_BYTES {
        return Err(AppError::BadRequest("Image too large".to_string()));
    }

    tracing::info!(user_id = user.user_id, bytes = decoded.len(), "Analyzing food image");

    let analysis = state.nutrition.analyze_image(&body.image_base64).await?;

    let now = chrono::Utc::now();
    let day = day_key(now);
    let meal_type = body.meal_type.unwrap_or_else(|| "snack".to_string());

    let log = state
        .db
        .insert_food_log(user.user_id, &day, &analysis, &meal_type, now)
        .await?;

    Ok(Json(AnalyzeResponse { analysis, log }))
}

#[derive(Serialize)]
pub struct TodayFoodResponse {
    pub logs: Vec<FoodLog>,
    pub total: FoodTotals,
}

/// Today's food logs, newest first, with macro totals.
async fn get_today_food(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<TodayFoodResponse>> {
    let day = day_key(chrono::Utc::now());
    let logs = state.db.food_logs_for_day(user.user_id, &day).await?;
    let total = FoodTotals::from_logs(&logs);

    Ok(Json(TodayFoodResponse { logs, total }))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Delete one of the caller's own food logs.
async fn delete_food(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state.db.delete_food_log(user.user_id, id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Food log {} not found", id)));
    }

    Ok(Json(DeleteResponse { success: true }))
}
