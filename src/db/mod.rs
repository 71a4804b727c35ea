//! Database layer (SQLite via sqlx).

pub mod store;

pub use store::Db;

/// Table names as constants.
pub mod tables {
    pub const WATER_LOGS: &str = "water_logs";
    pub const STEP_LOGS: &str = "step_logs";
    /// Daily exercise summary (running fold over `exercises`)
    pub const EXERCISE_LOGS: &str = "exercise_logs";
    /// Append-only exercise detail entries
    pub const EXERCISES: &str = "exercises";
    pub const FOOD_LOGS: &str = "food_logs";
    pub const PROFILES: &str = "profiles";
}
