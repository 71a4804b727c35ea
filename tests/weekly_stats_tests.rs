// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly exercise rollup tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

mod common;

const USER: i64 = 42;

async fn get_weekly(app: &Router, token: &str, query: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/exercise/stats/weekly{}", query))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_empty_week_is_zero_filled() {
    let (app, state) = common::create_test_app().await;
    let token = common::test_jwt(USER, &state.config.jwt_signing_key);

    let (status, body) = get_weekly(&app, &token, "").await;

    assert_eq!(status, StatusCode::OK);
    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["weekday"], "Monday");
    assert_eq!(days[6]["weekday"], "Sunday");
    for day in days {
        assert_eq!(day["minutes"], 0);
        assert_eq!(day["calories"], 0);
        assert_eq!(day["entries"], 0);
    }
    assert_eq!(body["summary"]["minutes"], 0);
    assert_eq!(body["summary"]["active_days"], 0);
    assert_eq!(body["summary"]["avg_calories_per_day"], 0);
}

#[tokio::test]
async fn test_current_week_includes_todays_entries() {
    let (app, state) = common::create_test_app().await;
    let token = common::test_jwt(USER, &state.config.jwt_signing_key);

    let now = chrono::Utc::now();
    let day = fittrack_api::time_utils::day_key(now);
    state
        .db
        .add_exercise_entry(USER, &day, "Cardio", "Run", 30, 280, now)
        .await
        .unwrap();
    state
        .db
        .add_exercise_entry(USER, &day, "Cardio", "Bike", 20, 140, now)
        .await
        .unwrap();

    let (status, body) = get_weekly(&app, &token, "?week_offset=0").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["minutes"], 50);
    assert_eq!(body["summary"]["calories"], 420);
    assert_eq!(body["summary"]["entries"], 2);
    assert_eq!(body["summary"]["active_days"], 1);
    // 420 / 7 = 60
    assert_eq!(body["summary"]["avg_calories_per_day"], 60);

    // Today's bucket carries the totals
    let days = body["days"].as_array().unwrap();
    let bucket = days.iter().find(|d| d["date"] == day.as_str()).unwrap();
    assert_eq!(bucket["minutes"], 30 + 20);
    assert_eq!(bucket["entries"], 2);
}

#[tokio::test]
async fn test_previous_week_excludes_todays_entries() {
    let (app, state) = common::create_test_app().await;
    let token = common::test_jwt(USER, &state.config.jwt_signing_key);

    let now = chrono::Utc::now();
    let day = fittrack_api::time_utils::day_key(now);
    state
        .db
        .add_exercise_entry(USER, &day, "Cardio", "Run", 30, 280, now)
        .await
        .unwrap();

    let (status, body) = get_weekly(&app, &token, "?week_offset=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["entries"], 0);
    assert_eq!(body["days"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_negative_offset_is_rejected() {
    let (app, state) = common::create_test_app().await;
    let token = common::test_jwt(USER, &state.config.jwt_signing_key);

    let (status, _) = get_weekly(&app, &token, "?week_offset=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
