// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitTrack: personal health-tracking API
//!
//! This crate provides the backend API for logging daily water intake,
//! steps, exercise sessions and food, with a dashboard aggregating the
//! day's progress against goals.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Db;
use services::NutritionService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub nutrition: NutritionService,
}
