//! OpenAI-backed chat completion client.
//! Status codes are mapped onto the failure kinds callers can branch on.

use super::{ChatCompletion, CompletionRequest};
use crate::error::{LlmError, RecapError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tracing::debug;

/// Production chat completions endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Client for the OpenAI chat completions API.
pub struct OpenAiClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Create a client reading the API key from `OPENAI_API_KEY`.
    pub fn from_env(model: &str) -> Result<Self> {
        let key =
            std::env::var("OPENAI_API_KEY").map_err(|_| RecapError::InvalidConfiguration {
                reason: "OPENAI_API_KEY environment variable is not set".to_string(),
            })?;
        Ok(Self::new(DEFAULT_API_URL, &key, model))
    }

    /// Create a client against an explicit endpoint, used by tests.
    pub fn new(api_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    /// Send one completion request and return the trimmed message content.
    async fn complete(&self, request: CompletionRequest) -> std::result::Result<String, LlmError> {
        debug!("posting completion request to {}", self.api_url);
        let body = json!({
            "model": self.model,
            "temperature": request.temperature,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.user},
            ],
        });
        let resp = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth(detail),
                StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimit(detail),
                s if s.is_server_error() => LlmError::Network(format!("status {s}: {detail}")),
                s => LlmError::MalformedResponse(format!("unexpected status {s}: {detail}")),
            });
        }
        let value: Value = resp
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;
        let content = value["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| LlmError::MalformedResponse("missing message content".to_string()))?;
        Ok(content.trim().to_string())
    }
}
