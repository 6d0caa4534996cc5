use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::GenerationClient;
use crate::connector::adapter::gigachat_client::DEFAULT_TEMPERATURE;
use crate::domain::{DomainError, GenerationMessage};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3";
const CHAT_PATH: &str = "/api/chat";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<GenerationMessage>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<GenerationMessage>,
}

/// Client for a locally running Ollama server. No authentication.
pub struct OllamaClient {
    client: reqwest::Client,
    url: String,
    model: String,
    temperature: f32,
}

impl OllamaClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let base: String = base_url.into();
        let url = format!("{}{CHAT_PATH}", base.trim_end_matches('/'));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url,
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl GenerationClient for OllamaClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, DomainError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![GenerationMessage::user(prompt)],
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DomainError::transport(format!("Ollama not reachable at {}: {e}", self.url))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::transport(format!("failed to read Ollama response: {e}")))?;
        debug!("Ollama raw response body:\n{body}");

        if !status.is_success() {
            warn!("Ollama returned {status}");
            return Err(DomainError::transport(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            DomainError::transport(format!("failed to parse Ollama response envelope: {e}"))
        })?;

        match parsed.message {
            Some(message) if !message.content.trim().is_empty() => Ok(message.content),
            _ => Err(DomainError::model_output(
                "Ollama returned an empty response",
                body,
            )),
        }
    }

    fn provider_name(&self) -> &str {
        "Ollama"
    }
}
