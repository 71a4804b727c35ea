// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Biometric profile routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Profile, ProfileInput};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, patch},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile", get(get_profile).put(upsert_profile))
        .route("/api/profile/weight", patch(update_weight))
}

#[derive(Serialize)]
struct ProfileBody {
    #[serde(flatten)]
    profile: Profile,
    /// Derived, never stored
    bmi: Option<f64>,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    profile: Option<ProfileBody>,
}

impl From<Option<Profile>> for ProfileResponse {
    fn from(profile: Option<Profile>) -> Self {
        Self {
            profile: profile.map(|p| ProfileBody { bmi: p.bmi(), profile: p }),
        }
    }
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let profile = state.db.get_profile(user.user_id).await?;
    Ok(Json(profile.into()))
}

async fn upsert_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<ProfileInput>,
) -> Result<Json<ProfileResponse>> {
    let profile = state
        .db
        .upsert_profile(user.user_id, &body, chrono::Utc::now())
        .await?;

    Ok(Json(Some(profile).into()))
}

#[derive(Deserialize)]
struct WeightRequest {
    weight: f64,
}

async fn update_weight(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<WeightRequest>,
) -> Result<Json<ProfileResponse>> {
    if !(body.weight > 0.0) {
        return Err(AppError::BadRequest("Invalid weight".to_string()));
    }

    let profile = state
        .db
        .update_weight(user.user_id, body.weight, chrono::Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(Some(profile).into()))
}
