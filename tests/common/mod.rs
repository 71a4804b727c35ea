// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use fittrack_api::config::Config;
use fittrack_api::db::Db;
use fittrack_api::middleware::auth::create_jwt;
use fittrack_api::routes::create_router;
use fittrack_api::services::NutritionService;
use fittrack_api::AppState;
use std::sync::Arc;

/// Create a fresh in-memory test database with the schema applied.
#[allow(dead_code)]
pub async fn test_db() -> Db {
    Db::connect_in_memory()
        .await
        .expect("Failed to create in-memory database")
}

/// Create a test app backed by an in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db().await;
    let nutrition = NutritionService::new(&config);

    let state = Arc::new(AppState {
        config,
        db,
        nutrition,
    });

    (create_router(state.clone()), state)
}

/// Create a JWT accepted by the test app.
#[allow(dead_code)]
pub fn test_jwt(user_id: i64, signing_key: &[u8]) -> String {
    create_jwt(user_id, signing_key).expect("Failed to create test JWT")
}
