use async_trait::async_trait;

use crate::domain::DomainError;

/// Reduces a customer request to the search keywords that matter for catalog
/// matching: product nouns, specs and article numbers, without quantities,
/// units or filler words.
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    async fn extract(&self, query: &str) -> Result<Vec<String>, DomainError>;
}
