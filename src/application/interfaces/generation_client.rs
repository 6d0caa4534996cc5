use async_trait::async_trait;

use crate::domain::DomainError;

/// Sends a single-turn prompt to an LLM provider and returns the raw text of
/// the first answer.
///
/// Implementors own transport, authentication and the provider's envelope
/// format. No retries happen behind this seam; every failure is terminal for
/// the call.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<String, DomainError>;

    /// Human-readable provider name, for logging.
    fn provider_name(&self) -> &str;
}
