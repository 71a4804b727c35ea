// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitTrack API Server
//!
//! Tracks daily water intake, steps, exercise and food against per-metric
//! goals, with a unified dashboard.

use fittrack_api::{config::Config, db::Db, services::NutritionService, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting FitTrack API");

    // Connect to the database and create the schema up front; tables are
    // never provisioned lazily per request.
    let db = Db::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    db.migrate().await.expect("Failed to run schema migration");

    // Nutrition inference client
    let nutrition = NutritionService::new(&config);
    tracing::info!(model = %config.inference_model, "Nutrition service initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        nutrition,
    });

    // Build router
    let app = fittrack_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fittrack_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
