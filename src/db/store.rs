// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite store with typed operations.
//!
//! Provides high-level operations for:
//! - Counter ledgers (water, steps): atomic upsert-accumulate per (user, day)
//! - Exercise summary + append-only detail entries
//! - Food logs
//! - Profiles
//!
//! Every accumulate path is a single `INSERT .. ON CONFLICT .. DO UPDATE ..
//! RETURNING` statement, so concurrent adds for the same (user, day) row
//! serialize inside the store and no update is lost.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::db::tables;
use crate::error::AppError;
use crate::models::ledger::DEFAULT_EXERCISE_GOAL;
use crate::models::{CounterMetric, CounterTotals, ExerciseEntry, ExerciseTotals, FoodLog,
    NutritionEstimate, Profile, ProfileInput};

/// Database client.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Connect to the database at `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        // In-memory databases exist per connection; keep the pool at one
        // connection so all operations see the same database.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        tracing::info!(url = database_url, "Connected to SQLite");

        Ok(Self { pool })
    }

    /// In-memory database for tests.
    pub async fn connect_in_memory() -> Result<Self, AppError> {
        let db = Self::connect("sqlite::memory:").await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Raw pool access, for tests and migrations tooling.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the schema. Runs once at process start; tables are never
    /// provisioned lazily per request.
    pub async fn migrate(&self) -> Result<(), AppError> {
        let statements = [
            format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL,
                    day TEXT NOT NULL,
                    count INTEGER NOT NULL DEFAULT 0,
                    goal INTEGER NOT NULL DEFAULT 8,
                    UNIQUE(user_id, day)
                )",
                tables::WATER_LOGS
            ),
            format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL,
                    day TEXT NOT NULL,
                    steps INTEGER NOT NULL DEFAULT 0,
                    goal INTEGER NOT NULL DEFAULT 10000,
                    UNIQUE(user_id, day)
                )",
                tables::STEP_LOGS
            ),
            format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL,
                    day TEXT NOT NULL,
                    minutes INTEGER NOT NULL DEFAULT 0,
                    calories INTEGER NOT NULL DEFAULT 0,
                    goal INTEGER NOT NULL DEFAULT 30,
                    UNIQUE(user_id, day)
                )",
                tables::EXERCISE_LOGS
            ),
            format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL,
                    day TEXT NOT NULL,
                    type TEXT NOT NULL,
                    activity TEXT NOT NULL,
                    minutes INTEGER NOT NULL,
                    calories INTEGER NOT NULL,
                    created_at TEXT NOT NULL
                )",
                tables::EXERCISES
            ),
            format!(
                "CREATE INDEX IF NOT EXISTS idx_exercises_user_day ON {} (user_id, day)",
                tables::EXERCISES
            ),
            format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL,
                    day TEXT NOT NULL,
                    food_name TEXT NOT NULL,
                    description TEXT NOT NULL DEFAULT '',
                    calories INTEGER NOT NULL DEFAULT 0,
                    protein REAL NOT NULL DEFAULT 0,
                    carbs REAL NOT NULL DEFAULT 0,
                    fat REAL NOT NULL DEFAULT 0,
                    meal_type TEXT NOT NULL DEFAULT 'snack',
                    created_at TEXT NOT NULL
                )",
                tables::FOOD_LOGS
            ),
            format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL UNIQUE,
                    age INTEGER,
                    gender TEXT,
                    height REAL,
                    weight REAL,
                    target_weight REAL,
                    activity_level TEXT,
                    updated_at TEXT NOT NULL
                )",
                tables::PROFILES
            ),
        ];

        for statement in &statements {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        tracing::info!("Schema migration complete");
        Ok(())
    }

    // ─── Counter Ledgers (water, steps) ──────────────────────────

    /// Read a counter's day row. Side-effect-free: a miss returns `None`
    /// and creates nothing.
    pub async fn counter_today(
        &self,
        user_id: i64,
        day: &str,
        metric: CounterMetric,
    ) -> Result<Option<CounterTotals>, AppError> {
        let sql = format!(
            "SELECT {col} AS value, goal FROM {table} WHERE user_id = ? AND day = ?",
            col = metric.value_column(),
            table = metric.table()
        );

        let row = sqlx::query_as::<_, CounterTotals>(&sql)
            .bind(user_id)
            .bind(day)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Accumulate `delta` into a counter's day row, creating the row on
    /// first write with the metric's default goal. Single atomic statement:
    /// concurrent adds cannot lose updates. The goal is never touched here.
    pub async fn counter_add(
        &self,
        user_id: i64,
        day: &str,
        metric: CounterMetric,
        delta: i64,
    ) -> Result<CounterTotals, AppError> {
        let col = metric.value_column();
        let (seed, bump) = if metric.floors_at_zero() {
            ("max(0, ?)".to_string(), format!("max(0, {col} + ?)"))
        } else {
            ("?".to_string(), format!("{col} + ?"))
        };

        let sql = format!(
            "INSERT INTO {table} (user_id, day, {col}, goal) VALUES (?, ?, {seed}, ?)
             ON CONFLICT(user_id, day) DO UPDATE SET {col} = {bump}
             RETURNING {col} AS value, goal",
            table = metric.table()
        );

        let totals = sqlx::query_as::<_, CounterTotals>(&sql)
            .bind(user_id)
            .bind(day)
            .bind(delta)
            .bind(metric.default_goal())
            .bind(delta)
            .fetch_one(&self.pool)
            .await?;

        Ok(totals)
    }

    /// Set a counter's goal for the day, leaving the accumulated value
    /// untouched. Creates a zero-valued row when none exists.
    pub async fn counter_set_goal(
        &self,
        user_id: i64,
        day: &str,
        metric: CounterMetric,
        goal: i64,
    ) -> Result<CounterTotals, AppError> {
        let sql = format!(
            "INSERT INTO {table} (user_id, day, {col}, goal) VALUES (?, ?, 0, ?)
             ON CONFLICT(user_id, day) DO UPDATE SET goal = excluded.goal
             RETURNING {col} AS value, goal",
            table = metric.table(),
            col = metric.value_column()
        );

        let totals = sqlx::query_as::<_, CounterTotals>(&sql)
            .bind(user_id)
            .bind(day)
            .bind(goal)
            .fetch_one(&self.pool)
            .await?;

        Ok(totals)
    }

    // ─── Exercise Summary + Detail Entries ───────────────────────

    /// Read the exercise summary row for a day.
    pub async fn exercise_today(
        &self,
        user_id: i64,
        day: &str,
    ) -> Result<Option<ExerciseTotals>, AppError> {
        let sql = format!(
            "SELECT minutes, calories, goal FROM {} WHERE user_id = ? AND day = ?",
            tables::EXERCISE_LOGS
        );

        let row = sqlx::query_as::<_, ExerciseTotals>(&sql)
            .bind(user_id)
            .bind(day)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Append one exercise entry and fold it into the day's summary, both
    /// inside one transaction so the summary and the entries cannot drift.
    pub async fn add_exercise_entry(
        &self,
        user_id: i64,
        day: &str,
        entry_type: &str,
        activity: &str,
        minutes: i64,
        calories: i64,
        now: DateTime<Utc>,
    ) -> Result<ExerciseTotals, AppError> {
        let mut tx = self.pool.begin().await?;

        let insert_entry = format!(
            "INSERT INTO {} (user_id, day, type, activity, minutes, calories, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            tables::EXERCISES
        );
        sqlx::query(&insert_entry)
            .bind(user_id)
            .bind(day)
            .bind(entry_type)
            .bind(activity)
            .bind(minutes)
            .bind(calories)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        let upsert_summary = format!(
            "INSERT INTO {} (user_id, day, minutes, calories, goal) VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(user_id, day) DO UPDATE SET
                 minutes = minutes + excluded.minutes,
                 calories = calories + excluded.calories
             RETURNING minutes, calories, goal",
            tables::EXERCISE_LOGS
        );
        let totals = sqlx::query_as::<_, ExerciseTotals>(&upsert_summary)
            .bind(user_id)
            .bind(day)
            .bind(minutes)
            .bind(calories)
            .bind(DEFAULT_EXERCISE_GOAL)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(totals)
    }

    /// Set the exercise minutes goal for the day.
    pub async fn exercise_set_goal(
        &self,
        user_id: i64,
        day: &str,
        goal: i64,
    ) -> Result<ExerciseTotals, AppError> {
        let sql = format!(
            "INSERT INTO {} (user_id, day, minutes, calories, goal) VALUES (?, ?, 0, 0, ?)
             ON CONFLICT(user_id, day) DO UPDATE SET goal = excluded.goal
             RETURNING minutes, calories, goal",
            tables::EXERCISE_LOGS
        );

        let totals = sqlx::query_as::<_, ExerciseTotals>(&sql)
            .bind(user_id)
            .bind(day)
            .bind(goal)
            .fetch_one(&self.pool)
            .await?;

        Ok(totals)
    }

    /// List a day's exercise entries, newest first.
    pub async fn exercise_entries_for_day(
        &self,
        user_id: i64,
        day: &str,
    ) -> Result<Vec<ExerciseEntry>, AppError> {
        let sql = format!(
            "SELECT id, day, type, activity, minutes, calories, created_at
             FROM {} WHERE user_id = ? AND day = ?
             ORDER BY created_at DESC, id DESC",
            tables::EXERCISES
        );

        let entries = sqlx::query_as::<_, ExerciseEntry>(&sql)
            .bind(user_id)
            .bind(day)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    /// List exercise entries within a closed date range (weekly rollup).
    pub async fn exercise_entries_between(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExerciseEntry>, AppError> {
        let sql = format!(
            "SELECT id, day, type, activity, minutes, calories, created_at
             FROM {} WHERE user_id = ? AND day >= ? AND day <= ?
             ORDER BY day, created_at",
            tables::EXERCISES
        );

        let entries = sqlx::query_as::<_, ExerciseEntry>(&sql)
            .bind(user_id)
            .bind(start.format("%Y-%m-%d").to_string())
            .bind(end.format("%Y-%m-%d").to_string())
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    // ─── Food Logs ───────────────────────────────────────────────

    /// Store one analyzed food item for the day.
    pub async fn insert_food_log(
        &self,
        user_id: i64,
        day: &str,
        estimate: &NutritionEstimate,
        meal_type: &str,
        now: DateTime<Utc>,
    ) -> Result<FoodLog, AppError> {
        let sql = format!(
            "INSERT INTO {} (user_id, day, food_name, description, calories, protein, carbs, fat, meal_type, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id, day, food_name, description, calories, protein, carbs, fat, meal_type, created_at",
            tables::FOOD_LOGS
        );

        let log = sqlx::query_as::<_, FoodLog>(&sql)
            .bind(user_id)
            .bind(day)
            .bind(&estimate.food_name)
            .bind(&estimate.description)
            .bind(estimate.calories)
            .bind(estimate.protein)
            .bind(estimate.carbs)
            .bind(estimate.fat)
            .bind(meal_type)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(log)
    }

    /// List a day's food logs, newest first.
    pub async fn food_logs_for_day(
        &self,
        user_id: i64,
        day: &str,
    ) -> Result<Vec<FoodLog>, AppError> {
        let sql = format!(
            "SELECT id, day, food_name, description, calories, protein, carbs, fat, meal_type, created_at
             FROM {} WHERE user_id = ? AND day = ?
             ORDER BY created_at DESC, id DESC",
            tables::FOOD_LOGS
        );

        let logs = sqlx::query_as::<_, FoodLog>(&sql)
            .bind(user_id)
            .bind(day)
            .fetch_all(&self.pool)
            .await?;

        Ok(logs)
    }

    /// Delete a food log owned by the user. Returns whether a row existed.
    pub async fn delete_food_log(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let sql = format!(
            "DELETE FROM {} WHERE id = ? AND user_id = ?",
            tables::FOOD_LOGS
        );

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ─── Profiles ────────────────────────────────────────────────

    const PROFILE_COLUMNS: &'static str =
        "age, gender, height, weight, target_weight, activity_level, updated_at";

    /// Get a user's profile.
    pub async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE user_id = ?",
            Self::PROFILE_COLUMNS,
            tables::PROFILES
        );

        let profile = sqlx::query_as::<_, Profile>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    /// Create or replace a user's profile.
    pub async fn upsert_profile(
        &self,
        user_id: i64,
        input: &ProfileInput,
        now: DateTime<Utc>,
    ) -> Result<Profile, AppError> {
        let sql = format!(
            "INSERT INTO {} (user_id, age, gender, height, weight, target_weight, activity_level, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET
                 age = excluded.age,
                 gender = excluded.gender,
                 height = excluded.height,
                 weight = excluded.weight,
                 target_weight = excluded.target_weight,
                 activity_level = excluded.activity_level,
                 updated_at = excluded.updated_at
             RETURNING {}",
            tables::PROFILES,
            Self::PROFILE_COLUMNS
        );

        let profile = sqlx::query_as::<_, Profile>(&sql)
            .bind(user_id)
            .bind(input.age)
            .bind(&input.gender)
            .bind(input.height)
            .bind(input.weight)
            .bind(input.target_weight)
            .bind(&input.activity_level)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(profile)
    }

    /// Update only the weight. Returns `None` when no profile exists.
    pub async fn update_weight(
        &self,
        user_id: i64,
        weight: f64,
        now: DateTime<Utc>,
    ) -> Result<Option<Profile>, AppError> {
        let sql = format!(
            "UPDATE {} SET weight = ?, updated_at = ? WHERE user_id = ? RETURNING {}",
            tables::PROFILES,
            Self::PROFILE_COLUMNS
        );

        let profile = sqlx::query_as::<_, Profile>(&sql)
            .bind(weight)
            .bind(now)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }
}
