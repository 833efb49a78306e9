//! Language-model client that turns a voice transcript into item candidates.
//!
//! The model is asked to answer with a JSON array of candidate objects; this
//! client returns that array as raw `serde_json::Value`. Shape validation is
//! deliberately NOT done here - the core extractor is the validation
//! boundary for model output, and this client makes no promises about what
//! the model produced.

use chrono::NaiveDate;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::InterpreterConfig;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Errors that can occur when interpreting a transcript.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Failed to parse the model's answer.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Request body for the Messages API.
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: String,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response body from the Messages API (only the fields we read).
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Client for the transcript interpretation collaborator.
#[derive(Clone)]
pub struct TranscriptInterpreter {
    client: reqwest::Client,
    model: String,
}

impl TranscriptInterpreter {
    /// Create a new interpreter client.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &InterpreterConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(config.api_key.expose_secret())
                .expect("Invalid API key for header"),
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            model: config.model.clone(),
        }
    }

    /// Interpret a transcript into a raw candidate list.
    ///
    /// `today` anchors the model's expiration-date estimates; the core never
    /// re-derives dates the interpreter produced.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with an error
    /// status, or the model's answer is not JSON.
    #[instrument(skip(self, transcript), fields(model = %self.model))]
    pub async fn interpret(
        &self,
        transcript: &str,
        today: NaiveDate,
    ) -> Result<serde_json::Value, InterpreterError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: system_prompt(today),
            messages: vec![Message {
                role: "user",
                content: transcript,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InterpreterError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| InterpreterError::Parse(e.to_string()))?;

        let answer = body
            .content
            .iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text.as_str())
            .ok_or_else(|| InterpreterError::Parse("response has no text block".to_owned()))?;

        serde_json::from_str(strip_code_fences(answer))
            .map_err(|e| InterpreterError::Parse(format!("model answer is not JSON: {e}")))
    }
}

/// Instruction given to the model for every transcript.
fn system_prompt(today: NaiveDate) -> String {
    format!(
        "You convert spoken grocery descriptions into structured pantry items. \
         Respond with ONLY a JSON array, no prose. Each element must be an object \
         with exactly these keys: \"foodItem\" (string), \"quantity\" (number), \
         \"unit\" (string, empty string when the speaker gave none), and \
         \"expirationDate\" (mm/dd/yyyy). Today is {}. When the speaker does not \
         state an expiration date, estimate a realistic one for that food counted \
         from today. If no food items are mentioned, respond with [].",
        today.format("%m/%d/%Y")
    )
}

/// Models often wrap JSON answers in Markdown code fences; strip them.
fn strip_code_fences(answer: &str) -> &str {
    let trimmed = answer.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("[1, 2]"), "[1, 2]");
        assert_eq!(strip_code_fences("```json\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_code_fences("```\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_code_fences("  [1, 2]  "), "[1, 2]");
    }

    #[test]
    fn test_system_prompt_anchors_today() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let prompt = system_prompt(today);
        assert!(prompt.contains("01/10/2024"));
        assert!(prompt.contains("foodItem"));
        assert!(prompt.contains("expirationDate"));
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "id": "msg_01",
            "content": [
                {"type": "text", "text": "[{\"foodItem\": \"milk\"}]"}
            ],
            "model": "claude-sonnet-4-20250514"
        }"#;

        let response: MessagesResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.content.len(), 1);
        assert_eq!(response.content.first().unwrap().kind, "text");
    }
}
