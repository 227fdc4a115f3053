//! Vision backend abstraction.
//!
//! The extraction call is a single capability — send an image and an
//! instruction prompt, get free text back — so the rest of the
//! pipeline can be tested against a stub with canned text.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::AgentError;
use crate::config::AiConfig;

/// An image payload to extract from.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Encode as a `data:` URL for OpenAI-compatible vision APIs.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

/// Request to the vision backend.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub prompt: String,
    pub image: ImagePayload,
}

/// Trait for vision backends.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Send the image plus prompt, return the model's raw text.
    async fn extract(&self, request: VisionRequest) -> Result<String, AgentError>;
}

/// Groq backend implementation (OpenAI-compatible chat completions).
pub struct GroqBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    max_retries: u32,
}

impl GroqBackend {
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        timeout_seconds: u64,
        max_retries: u32,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url,
            model,
            api_key,
            max_retries,
        }
    }

    /// Build from configuration, reading the API key from the
    /// configured environment variable.
    pub fn from_config(config: &AiConfig) -> Result<Self, AgentError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            AgentError::ServiceUnavailable(format!("{} env var not set", config.api_key_env))
        })?;

        Ok(Self::new(
            api_key,
            config.base_url.clone(),
            config.model.clone(),
            config.timeout_seconds,
            config.max_retries,
        ))
    }
}

/// Groq API request format.
#[derive(Debug, Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<GroqMessage>,
}

#[derive(Debug, Serialize)]
struct GroqMessage {
    role: String,
    content: Vec<GroqContent>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum GroqContent {
    Text { text: String },
    ImageUrl { image_url: GroqImageUrl },
}

#[derive(Debug, Serialize)]
struct GroqImageUrl {
    url: String,
}

/// Groq API response format.
#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: String,
}

#[async_trait]
impl VisionBackend for GroqBackend {
    fn name(&self) -> &'static str {
        "groq"
    }

    async fn extract(&self, request: VisionRequest) -> Result<String, AgentError> {
        let url = format!("{}/openai/v1/chat/completions", self.base_url);

        let groq_request = GroqRequest {
            model: self.model.clone(),
            messages: vec![GroqMessage {
                role: "user".to_string(),
                content: vec![
                    GroqContent::Text {
                        text: request.prompt,
                    },
                    GroqContent::ImageUrl {
                        image_url: GroqImageUrl {
                            url: request.image.to_data_url(),
                        },
                    },
                ],
            }],
        };

        debug!("Sending vision request to Groq: {}", url);

        // Retry loop for rate limiting (429) with exponential backoff
        for attempt in 0..=self.max_retries {
            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&groq_request)
                .send()
                .await
                .map_err(|e| AgentError::ServiceUnavailable(e.to_string()))?;

            if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                if attempt == self.max_retries {
                    let body = response.text().await.unwrap_or_default();
                    return Err(AgentError::ServiceError {
                        status: 429,
                        body: format!("rate limit after {} retries: {}", self.max_retries, body),
                    });
                }

                // Honor retry-after when present, else back off exponentially
                let wait_secs = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(2 * (1 << attempt));

                warn!(
                    "Rate limited (attempt {}/{}), waiting {}s before retry",
                    attempt + 1,
                    self.max_retries,
                    wait_secs
                );
                tokio::time::sleep(std::time::Duration::from_secs(wait_secs)).await;
                continue;
            }

            if !response.status().is_success() {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                return Err(AgentError::ServiceError { status, body });
            }

            let groq_response: GroqResponse = response.json().await.map_err(|e| {
                AgentError::ServiceUnavailable(format!("invalid response body: {}", e))
            })?;

            let content = groq_response
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content)
                .ok_or_else(|| {
                    AgentError::ServiceUnavailable("response contained no choices".to_string())
                })?;

            return Ok(content.trim().to_string());
        }

        Err(AgentError::ServiceUnavailable(
            "no response after retries".to_string(),
        ))
    }
}

/// Mock backend for testing.
#[cfg(test)]
pub struct MockBackend {
    response: String,
}

#[cfg(test)]
impl MockBackend {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl VisionBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn extract(&self, _request: VisionRequest) -> Result<String, AgentError> {
        Ok(self.response.clone())
    }
}
