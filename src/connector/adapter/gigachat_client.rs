use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::GenerationClient;
use crate::connector::adapter::CredentialBroker;
use crate::domain::{DomainError, GenerationMessage};

pub const DEFAULT_API_URL: &str = "https://gigachat.devices.sberbank.ru/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "GigaChat:latest";
/// Low temperature keeps the structured answers stable.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<GenerationMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Cloud chat-completion client. Every request carries a bearer token
/// obtained from the shared [`CredentialBroker`].
pub struct GigaChatClient {
    client: reqwest::Client,
    broker: Arc<CredentialBroker>,
    url: String,
    model: String,
    temperature: f32,
}

impl GigaChatClient {
    pub fn new(
        broker: Arc<CredentialBroker>,
        model: impl Into<String>,
        url: impl Into<String>,
        timeout: Duration,
        accept_invalid_certs: bool,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| DomainError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            broker,
            url: url.into(),
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
impl GenerationClient for GigaChatClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, DomainError> {
        let token = self.broker.get_token().await?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![GenerationMessage::user(prompt)],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.url)
            .header("Accept", "application/json")
            .bearer_auth(token.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("GigaChat request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::transport(format!("failed to read GigaChat response: {e}")))?;
        debug!("GigaChat raw response body:\n{body}");

        if !status.is_success() {
            warn!("GigaChat API returned {status}");
            return Err(DomainError::transport(format!(
                "GigaChat API returned {status}: {body}"
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            DomainError::transport(format!("failed to parse GigaChat response envelope: {e}"))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| DomainError::model_output("GigaChat returned an empty response", body))
    }

    fn provider_name(&self) -> &str {
        "GigaChat"
    }
}
