use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::TokenExchange;
use crate::domain::{AccessToken, DomainError};

pub const DEFAULT_AUTH_URL: &str = "https://ngw.devices.sberbank.ru:9443/api/v2/oauth";
pub const DEFAULT_SCOPE: &str = "GIGACHAT_API_PERS";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Epoch milliseconds.
    expires_at: i64,
}

/// Exchanges the GigaChat authorization key for a short-lived access token.
pub struct GigaChatOAuth {
    client: reqwest::Client,
    url: String,
    api_key: SecretString,
    scope: String,
}

impl GigaChatOAuth {
    pub fn new(
        api_key: SecretString,
        scope: impl Into<String>,
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
            url: url.into(),
            api_key,
            scope: scope.into(),
        })
    }
}

#[async_trait]
impl TokenExchange for GigaChatOAuth {
    async fn exchange(&self) -> Result<AccessToken, DomainError> {
        let request_id = Uuid::new_v4().to_string();
        debug!("Token exchange RqUID={request_id}");

        let response = self
            .client
            .post(&self.url)
            .header("Accept", "application/json")
            .header("RqUID", request_id)
            .header(
                "Authorization",
                format!("Basic {}", self.api_key.expose_secret()),
            )
            .form(&[("scope", self.scope.as_str())])
            .send()
            .await
            .map_err(|e| DomainError::auth(format!("token request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::auth(format!("failed to read token response: {e}")))?;

        if !status.is_success() {
            warn!("Token endpoint returned {status}");
            return Err(DomainError::auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| DomainError::auth(format!("failed to parse token response: {e}")))?;

        AccessToken::from_provider_expiry(parsed.access_token, parsed.expires_at).ok_or_else(|| {
            DomainError::auth(format!(
                "token endpoint returned an invalid expiry: {}",
                parsed.expires_at
            ))
        })
    }
}
