mod catalog_repository;
mod document_renderer;
mod generation_client;
mod keyword_extractor;
mod quote_log;
mod token_exchange;

pub use catalog_repository::*;
pub use document_renderer::*;
pub use generation_client::*;
pub use keyword_extractor::*;
pub use quote_log::*;
pub use token_exchange::*;
