// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end tests for the water/steps/exercise tracking endpoints.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

mod common;

const USER: i64 = 42;

async fn send(
    app: &Router,
    token: &str,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    let request = if let Some(json) = body {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        builder.body(Body::from(json.to_string())).unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

#[tokio::test]
async fn test_water_defaults_before_any_write() {
    let (app, state) = common::create_test_app().await;
    let token = common::test_jwt(USER, &state.config.jwt_signing_key);

    let (status, body) = send(&app, &token, "GET", "/api/water/today", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    assert_eq!(body["goal"], 8);
}

#[tokio::test]
async fn test_water_add_then_goal_end_to_end() {
    let (app, state) = common::create_test_app().await;
    let token = common::test_jwt(USER, &state.config.jwt_signing_key);

    send(&app, &token, "POST", "/api/water/add", Some(r#"{"glasses": 3}"#)).await;
    send(&app, &token, "POST", "/api/water/add", Some(r#"{"glasses": 2}"#)).await;
    let (_, after_goal) =
        send(&app, &token, "POST", "/api/water/goal", Some(r#"{"goal": 10}"#)).await;

    // Goal update leaves the accumulated count alone
    assert_eq!(after_goal["count"], 5);
    assert_eq!(after_goal["goal"], 10);

    let (status, body) = send(&app, &token, "GET", "/api/water/today", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 5);
    assert_eq!(body["goal"], 10);
}

#[tokio::test]
async fn test_water_add_defaults_to_one_glass() {
    let (app, state) = common::create_test_app().await;
    let token = common::test_jwt(USER, &state.config.jwt_signing_key);

    let (status, body) = send(&app, &token, "POST", "/api/water/add", Some("{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_water_never_goes_negative() {
    let (app, state) = common::create_test_app().await;
    let token = common::test_jwt(USER, &state.config.jwt_signing_key);

    send(&app, &token, "POST", "/api/water/add", Some(r#"{"glasses": 2}"#)).await;
    let (_, body) =
        send(&app, &token, "POST", "/api/water/add", Some(r#"{"glasses": -7}"#)).await;

    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_invalid_goal_substitutes_default() {
    let (app, state) = common::create_test_app().await;
    let token = common::test_jwt(USER, &state.config.jwt_signing_key);

    let (_, body) = send(&app, &token, "POST", "/api/water/goal", Some(r#"{"goal": -3}"#)).await;
    assert_eq!(body["goal"], 8);

    let (_, body) = send(&app, &token, "POST", "/api/steps/goal", Some("{}")).await;
    assert_eq!(body["goal"], 10000);
}

#[tokio::test]
async fn test_steps_add_defaults_to_500() {
    let (app, state) = common::create_test_app().await;
    let token = common::test_jwt(USER, &state.config.jwt_signing_key);

    let (_, body) = send(&app, &token, "POST", "/api/steps/add", Some("{}")).await;
    assert_eq!(body["steps"], 500);
    assert_eq!(body["goal"], 10000);

    let (_, body) =
        send(&app, &token, "POST", "/api/steps/add", Some(r#"{"steps": 2500}"#)).await;
    assert_eq!(body["steps"], 3000);
}

#[tokio::test]
async fn test_exercise_add_substitutes_defaults_for_missing_fields() {
    let (app, state) = common::create_test_app().await;
    let token = common::test_jwt(USER, &state.config.jwt_signing_key);

    // Empty body never rejects; every field has a documented default
    let (status, body) = send(&app, &token, "POST", "/api/exercise/add", Some("{}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["minutes"], 5);
    assert_eq!(body["calories"], 20);
    assert_eq!(body["goal"], 30);

    let (_, today) = send(&app, &token, "GET", "/api/exercise/today", None).await;
    let list = today["list"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["type"], "Cardio");
    assert_eq!(list[0]["activity"], "Exercise");
}

#[tokio::test]
async fn test_exercise_today_lists_entries_newest_first() {
    let (app, state) = common::create_test_app().await;
    let token = common::test_jwt(USER, &state.config.jwt_signing_key);

    send(
        &app,
        &token,
        "POST",
        "/api/exercise/add",
        Some(r#"{"type":"Cardio","activity":"Run","minutes":30,"calories":250}"#),
    )
    .await;
    send(
        &app,
        &token,
        "POST",
        "/api/exercise/add",
        Some(r#"{"type":"Strength","activity":"Lifting","minutes":20,"calories":150}"#),
    )
    .await;

    let (status, body) = send(&app, &token, "GET", "/api/exercise/today", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["minutes"], 50);
    assert_eq!(body["calories"], 400);

    let list = body["list"].as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["activity"], "Lifting");
    assert_eq!(list[1]["activity"], "Run");
}

#[tokio::test]
async fn test_exercise_listing_degrades_when_detail_table_missing() {
    let (app, state) = common::create_test_app().await;
    let token = common::test_jwt(USER, &state.config.jwt_signing_key);

    // Summary row exists, then the detail table disappears
    state.db.exercise_set_goal(USER, "2024-03-07", 45).await.unwrap();
    sqlx::query("DROP TABLE exercises")
        .execute(state.db.pool())
        .await
        .unwrap();

    let (status, body) = send(&app, &token, "GET", "/api/exercise/today", None).await;

    // The summary read still succeeds; the listing degrades to empty
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["list"].as_array().unwrap().len(), 0);
}
