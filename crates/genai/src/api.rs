//! REST client for the hosted `generateContent` endpoint.
//!
//! Sends a single-turn prompt and returns the text of the first candidate,
//! using [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

/// HTTP request timeout for one generation call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the text-generation REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Text generation API error ({status}): {body}")]
    Api {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Something that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// `Ok(None)` when the provider answered without any text.
    async fn generate(&self, model: &str, prompt: &str) -> Result<Option<String>, GenAiError>;
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

/// HTTP client for the hosted model API.
pub struct GeminiApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiApi {
    /// * `base_url` - API root, e.g. `https://generativelanguage.googleapis.com`.
    pub fn new(base_url: String, api_key: String) -> Result<Self, GenAiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling).
    pub fn with_client(client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for GeminiApi {
    async fn generate(&self, model: &str, prompt: &str) -> Result<Option<String>, GenAiError> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(parsed.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> Option<String> {
        serde_json::from_value::<GenerateContentResponse>(value)
            .unwrap()
            .text()
    }

    #[test]
    fn joins_parts_of_first_candidate() {
        let text = parse(serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Một " }, { "text": "đoạn." }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }));
        assert_eq!(text.as_deref(), Some("Một đoạn."));
    }

    #[test]
    fn no_candidates_means_no_text() {
        assert_eq!(parse(serde_json::json!({})), None);
        assert_eq!(parse(serde_json::json!({ "candidates": [{}] })), None);
        assert_eq!(
            parse(serde_json::json!({ "candidates": [{ "content": { "parts": [{}] } }] })),
            None
        );
    }

    #[test]
    fn endpoint_includes_model() {
        let api = GeminiApi::with_client(
            reqwest::Client::new(),
            "https://example.test/".into(),
            "k".into(),
        );
        assert_eq!(
            api.endpoint("gemini-3-flash-preview"),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }
}
