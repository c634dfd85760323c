//! Chat-completion client.

use crate::config::LlmConfig;
use crate::error::{NarrativeError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Something that turns a prompt into text.
pub trait TextGenerator {
    /// Complete a single-message prompt.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    config: LlmConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    /// Build a client from `config`.
    pub fn new(config: LlmConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(NarrativeError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Configuration in use.
    pub const fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
        }
    }
}

impl TextGenerator for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = self.config.completions_url();
        debug!(%url, model = %self.config.model, "requesting completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NarrativeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        first_choice(response.json().await?)
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Trimmed content of the first choice.
fn first_choice(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default().trim().to_string())
        .ok_or(NarrativeError::EmptyResponse)
}
