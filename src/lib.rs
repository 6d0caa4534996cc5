pub mod application;
pub mod cli;
pub mod config;
pub mod connector;
pub mod domain;

pub use cli::Commands;
pub use config::AppConfig;

pub use application::{
    AssembleQuoteUseCase, CatalogRepository, CatalogStore, DocumentRenderer, GenerationClient,
    KeywordExtractor, QuoteLog, RelevanceRetriever, TokenExchange,
};

pub use connector::api::{Container, Router};
pub use connector::{
    CredentialBroker, FileCatalogRepository, GigaChatClient, GigaChatOAuth, JsonQuoteLog,
    LlmKeywordExtractor, MockGenerationClient, OllamaClient, TeraDocumentRenderer,
};

pub use domain::{
    AccessToken, AssemblyStage, Catalog, DomainError, LineItem, Product, Quote, RenderedQuote,
    SelectedItem, Selection,
};
