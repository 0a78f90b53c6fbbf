use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::models::UserProfile;
use crate::settings::MessageSettings;

use super::prompt::build_reminder_prompt;
use super::{MessageProducer, FALLBACK_NO_CREDENTIALS, FALLBACK_ON_ERROR};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Reminder text from the Gemini `generateContent` API.
pub struct GeminiMessageProducer {
    api_key: Option<String>,
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiMessageProducer {
    pub fn from_settings(settings: &MessageSettings) -> Self {
        Self::new(
            settings.resolve_api_key(),
            settings.api_base.clone(),
            settings.model.clone(),
        )
    }

    pub fn new(api_key: Option<String>, api_base: String, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
            client,
        }
    }

    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow!("Request timed out after {REQUEST_TIMEOUT_SECS} seconds")
                } else if e.is_connect() {
                    anyhow!("Could not connect to {}", self.api_base)
                } else {
                    anyhow!("HTTP request failed: {e}")
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini API error {status}: {body}"));
        }

        let body: Value = response
            .json()
            .await
            .context("Gemini response was not JSON")?;

        extract_text(&body).ok_or_else(|| anyhow!("Gemini response had no text"))
    }
}

/// Joins the text parts of the first candidate, trimmed and without quotes.
fn extract_text(body: &Value) -> Option<String> {
    let parts = body
        .pointer("/candidates/0/content/parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    let cleaned = text.trim().replace('"', "");

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

#[async_trait]
impl MessageProducer for GeminiMessageProducer {
    async fn reminder_message(&self, profile: &UserProfile) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            log_error!("No Gemini API key configured, using default reminder text");
            return FALLBACK_NO_CREDENTIALS.to_string();
        };

        let prompt = build_reminder_prompt(profile);
        match self.generate(api_key, &prompt).await {
            Ok(text) => {
                log_debug!("Generated reminder: {}", text);
                text
            }
            Err(err) => {
                log_error!("Error generating reminder message: {err:#}");
                FALLBACK_ON_ERROR.to_string()
            }
        }
    }
}
