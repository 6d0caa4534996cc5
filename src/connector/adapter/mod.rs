mod credential_broker;
mod file_catalog_repository;
pub mod gigachat_client;
pub mod gigachat_oauth;
mod json_quote_log;
mod llm_keyword_extractor;
mod mock_generation;
pub mod ollama_client;
#[cfg(test)]
mod stub_server;
mod tera_renderer;

pub use credential_broker::*;
pub use file_catalog_repository::*;
pub use gigachat_client::GigaChatClient;
pub use gigachat_oauth::GigaChatOAuth;
pub use json_quote_log::*;
pub use llm_keyword_extractor::*;
pub use mock_generation::*;
pub use ollama_client::OllamaClient;
pub use tera_renderer::*;
