// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Image-to-nutrition inference client.
//!
//! Sends a food photo to an OpenAI-compatible vision endpoint and parses the
//! reply into a [`NutritionEstimate`]. The reply is an untrusted text
//! generator: first the markdown fences are stripped and the text parsed as
//! strict JSON, then a key/number pattern extraction is attempted, and only
//! if both fail does the request error out.

use serde::Deserialize;

use crate::config::Config;
use crate::error::AppError;
use crate::models::NutritionEstimate;

const ANALYSIS_PROMPT: &str = "Analyze this food image and provide nutrition information.\n\n\
IMPORTANT: Respond ONLY with valid JSON in this EXACT format (no markdown, no code blocks):\n\
{\"food_name\":\"name\",\"description\":\"short description\",\"calories\":number,\"protein\":number,\"carbs\":number,\"fat\":number}\n\n\
Be realistic with portions. Only return JSON, nothing else.";

/// Nutrition inference API client.
#[derive(Clone)]
pub struct NutritionService {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl NutritionService {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.inference_base_url.clone(),
            model: config.inference_model.clone(),
            api_key: config.inference_api_key.clone(),
        }
    }

    /// Analyze a base64-encoded JPEG and return the nutrition estimate.
    pub async fn analyze_image(&self, image_base64: &str) -> Result<NutritionEstimate, AppError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": ANALYSIS_PROMPT },
                    {
                        "type": "image_url",
                        "image_url": { "url": format!("data:image/jpeg;base64,{}", image_base64) }
                    }
                ]
            }],
            "max_tokens": 300,
            "temperature": 0.3
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::UpstreamInference(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamInference(format!(
                "Inference API returned {}",
                status
            )));
        }

        let reply: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamInference(format!("Malformed API response: {}", e)))?;

        let content = reply
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| AppError::UpstreamInference("Empty API response".to_string()))?;

        tracing::debug!(reply = content, "Inference reply received");

        parse_estimate(content)
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

/// Parse the model reply into an estimate.
///
/// Strict JSON first (after stripping any markdown code fences), then a
/// pattern-extraction fallback, then a hard failure.
pub fn parse_estimate(raw: &str) -> Result<NutritionEstimate, AppError> {
    let cleaned = strip_code_fences(raw);

    if let Ok(estimate) = serde_json::from_str::<NutritionEstimate>(&cleaned) {
        // A zero-calorie or nameless estimate is treated as a failed parse,
        // same as a malformed one.
        if !estimate.food_name.is_empty() && estimate.calories > 0 {
            return Ok(estimate);
        }
    }

    extract_estimate(raw).ok_or_else(|| {
        let preview: String = raw.chars().take(200).collect();
        AppError::UpstreamInference(format!("Failed to parse inference reply: {}", preview))
    })
}

/// Remove ```json ... ``` fences the model sometimes wraps around the JSON.
fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("```") {
        trimmed
            .replace("```json", "")
            .replace("```", "")
            .trim()
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// Fallback: pull fields out of free-form text by key.
fn extract_estimate(raw: &str) -> Option<NutritionEstimate> {
    let calories = extract_number(raw, "calories")? as i64;
    if calories <= 0 {
        return None;
    }

    Some(NutritionEstimate {
        food_name: extract_string(raw, "food_name").unwrap_or_else(|| "Unknown Food".to_string()),
        description: "Auto-detected".to_string(),
        calories,
        protein: extract_number(raw, "protein").unwrap_or(20.0),
        carbs: extract_number(raw, "carbs").unwrap_or(30.0),
        fat: extract_number(raw, "fat").unwrap_or(10.0),
    })
}

fn skip_separators(rest: &str) -> &str {
    rest.trim_start_matches(|c: char| c == '"' || c == '\'' || c == ':' || c.is_whitespace())
}

/// Extract the first number following `key`.
fn extract_number(text: &str, key: &str) -> Option<f64> {
    let idx = text.find(key)?;
    let rest = skip_separators(&text[idx + key.len()..]);
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    rest[..end].parse().ok()
}

/// Extract the quoted string following `key`.
fn extract_string(text: &str, key: &str) -> Option<String> {
    let idx = text.find(key)?;
    let rest = &text[idx + key.len()..];
    // Skip the key's closing quote and the separator, keep the value quotes.
    let rest = rest.trim_start_matches(|c: char| c == ':' || c == '\'' || c.is_whitespace() || c == '"');
    // The trim above also ate the value's opening quote; capture to the next one.
    let end = rest.find('"')?;
    let value = rest[..end].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
