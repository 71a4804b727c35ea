//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; handlers only ever see the cached
//! `Config` inside the shared state.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// SQLite database URL (e.g. `sqlite://fittrack.db`)
    pub database_url: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,

    // --- Nutrition inference service ---
    /// Base URL of the OpenAI-compatible chat completions API
    pub inference_base_url: String,
    /// Model used for food image analysis
    pub inference_model: String,
    /// API key for the inference service
    pub inference_api_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://fittrack.db?mode=rwc".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            inference_base_url: env::var("INFERENCE_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            inference_model: env::var("INFERENCE_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            inference_api_key: env::var("INFERENCE_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("INFERENCE_API_KEY"))?,
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            database_url: "sqlite::memory:".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            inference_base_url: "http://localhost:0".to_string(),
            inference_model: "test-model".to_string(),
            inference_api_key: "test_key".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("INFERENCE_API_KEY", "test_key");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 8080);
        assert_eq!(config.inference_model, "gpt-4o");
    }
}
