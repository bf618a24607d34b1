//! Gemini text generation client.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::GeminiConfig;
use crate::error::ApiError;

/// Generator failures.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Generator returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Rejected API key")]
    Authentication,

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Reply contained no text")]
    EmptyReply,
}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        ApiError::Ai(err.to_string())
    }
}

/// Anything that turns a prompt into free text.
#[async_trait]
pub trait VocabularyGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;

    /// Model name reported to clients.
    fn model(&self) -> &str;
}

/// Client for the `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

/// First candidate's first text part.
fn reply_text(body: &Value) -> Option<&str> {
    body["candidates"]
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}

#[async_trait]
impl VocabularyGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == 429 {
            return Err(GenerateError::RateLimited);
        }
        if status == 401 || status == 403 {
            return Err(GenerateError::Authentication);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerateError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let json: Value = response.json().await?;
        let text = reply_text(&json)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(GenerateError::EmptyReply)?;

        tracing::debug!(model = %self.model, chars = text.len(), "Generator replied");
        Ok(text.to_string())
    }

    fn model(&self) -> &str {
        &self.model
    }
}
