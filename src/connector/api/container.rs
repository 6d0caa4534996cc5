use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use secrecy::SecretString;
use tracing::{debug, info};

use crate::application::{
    AssembleQuoteUseCase, CatalogRepository, CatalogStore, DocumentRenderer, GenerationClient,
    QuoteLog, RelevanceRetriever,
};
use crate::config::AppConfig;
use crate::connector::adapter::{
    CredentialBroker, FileCatalogRepository, GigaChatClient, GigaChatOAuth, JsonQuoteLog,
    LlmKeywordExtractor, OllamaClient, TeraDocumentRenderer,
};

/// Wires the adapters into the use cases. The generation provider is chosen
/// once here and shared by every stage.
pub struct Container {
    config: AppConfig,
    generation_client: Arc<dyn GenerationClient>,
    catalog_store: Arc<CatalogStore>,
    retriever: Arc<RelevanceRetriever>,
    renderer: Arc<dyn DocumentRenderer>,
    assemble_use_case: Arc<AssembleQuoteUseCase>,
}

impl Container {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let generation_client = Self::build_generation_client(&config)?;
        Self::with_generation_client(config, generation_client).await
    }

    /// Build the container around an already constructed generation client.
    pub async fn with_generation_client(
        config: AppConfig,
        generation_client: Arc<dyn GenerationClient>,
    ) -> Result<Self> {
        let repository: Arc<dyn CatalogRepository> = Arc::new(FileCatalogRepository::new(
            &config.catalog.source_path,
            &config.catalog.cache_path,
        ));
        let catalog_store = Arc::new(CatalogStore::new(
            repository,
            Arc::clone(&generation_client),
        ));

        if catalog_store.warm_from_cache().await {
            debug!("Catalog warmed from cache at startup");
        }

        let mut retriever = RelevanceRetriever::new(Arc::clone(&catalog_store));
        if config.model_keywords {
            retriever = retriever.with_keyword_extractor(Arc::new(LlmKeywordExtractor::new(
                Arc::clone(&generation_client),
            )));
        }
        let retriever = Arc::new(retriever);

        let renderer = match config.output.template_path {
            Some(ref path) => TeraDocumentRenderer::from_template_file(path)?,
            None => TeraDocumentRenderer::new()?,
        }
        .with_title(&config.output.document_title)
        .with_currency(&config.output.currency);
        let renderer: Arc<dyn DocumentRenderer> = Arc::new(renderer);

        let quote_log: Arc<dyn QuoteLog> = Arc::new(JsonQuoteLog::new(&config.output.log_dir));

        let assemble_use_case = Arc::new(
            AssembleQuoteUseCase::new(
                Arc::clone(&catalog_store),
                Arc::clone(&retriever),
                Arc::clone(&generation_client),
                Arc::clone(&renderer),
            )
            .with_quote_log(quote_log)
            .with_top_k(config.top_k),
        );

        Ok(Self {
            config,
            generation_client,
            catalog_store,
            retriever,
            renderer,
            assemble_use_case,
        })
    }

    fn build_generation_client(config: &AppConfig) -> Result<Arc<dyn GenerationClient>> {
        let timeout = Duration::from_secs(config.request_timeout_secs);

        if config.use_alternate_provider {
            info!(
                "Using local Ollama at {} (model {})",
                config.ollama.base_url, config.ollama.model
            );
            let client = OllamaClient::new(&config.ollama.base_url, &config.ollama.model, timeout)?;
            return Ok(Arc::new(client));
        }

        let giga = &config.giga_chat;
        info!("Using GigaChat (model {})", giga.model);
        if giga.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled for GigaChat");
        }

        let oauth = GigaChatOAuth::new(
            SecretString::from(giga.api_key.clone()),
            &giga.scope,
            &giga.auth_url,
            timeout,
            giga.accept_invalid_certs,
        )?;
        let broker = Arc::new(CredentialBroker::new(Arc::new(oauth)));
        let client = GigaChatClient::new(
            broker,
            &giga.model,
            &giga.api_url,
            timeout,
            giga.accept_invalid_certs,
        )?;
        Ok(Arc::new(client))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn generation_client(&self) -> Arc<dyn GenerationClient> {
        Arc::clone(&self.generation_client)
    }

    pub fn catalog_store(&self) -> Arc<CatalogStore> {
        Arc::clone(&self.catalog_store)
    }

    pub fn retriever(&self) -> Arc<RelevanceRetriever> {
        Arc::clone(&self.retriever)
    }

    pub fn renderer(&self) -> Arc<dyn DocumentRenderer> {
        Arc::clone(&self.renderer)
    }

    pub fn assemble_use_case(&self) -> Arc<AssembleQuoteUseCase> {
        Arc::clone(&self.assemble_use_case)
    }
}
