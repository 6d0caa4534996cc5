use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::use_cases::prompts::keyword_extraction_prompt;
use crate::application::{GenerationClient, KeywordExtractor};
use crate::domain::{parse_structured, DomainError};

#[derive(Deserialize)]
struct KeywordResponse {
    #[serde(default)]
    keywords: Vec<String>,
}

/// Asks the model for the searchable keywords of a customer request.
pub struct LlmKeywordExtractor {
    generation_client: Arc<dyn GenerationClient>,
}

impl LlmKeywordExtractor {
    pub fn new(generation_client: Arc<dyn GenerationClient>) -> Self {
        Self { generation_client }
    }
}

#[async_trait]
impl KeywordExtractor for LlmKeywordExtractor {
    async fn extract(&self, query: &str) -> Result<Vec<String>, DomainError> {
        let response = self
            .generation_client
            .generate_text(&keyword_extraction_prompt(query))
            .await?;
        let parsed: KeywordResponse = parse_structured(&response)?;
        Ok(parsed.keywords)
    }
}
