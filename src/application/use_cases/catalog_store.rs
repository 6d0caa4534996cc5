use std::sync::Arc;
use std::time::Instant;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::application::use_cases::prompts::catalog_extraction_prompt;
use crate::application::{CatalogRepository, GenerationClient};
use crate::domain::{parse_structured, Catalog, DomainError, ParsedProduct, Product};

/// Owns the product catalog and materializes it on first use.
///
/// The catalog moves through `uninitialized → loading → ready` exactly once.
/// Concurrent callers during `loading` wait for the in-flight load instead of
/// starting their own; a failed load leaves the store uninitialized so a later
/// call can try again. Once ready, reads never take a lock.
pub struct CatalogStore {
    repository: Arc<dyn CatalogRepository>,
    generation_client: Arc<dyn GenerationClient>,
    catalog: OnceCell<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(
        repository: Arc<dyn CatalogRepository>,
        generation_client: Arc<dyn GenerationClient>,
    ) -> Self {
        Self {
            repository,
            generation_client,
            catalog: OnceCell::new(),
        }
    }

    /// Adopt the cached catalog if one exists, without falling back to the raw
    /// source. Returns whether the store is ready afterwards.
    pub async fn warm_from_cache(&self) -> bool {
        if self.catalog.initialized() {
            return true;
        }

        let result = self
            .catalog
            .get_or_try_init(|| async {
                match self.load_cached().await? {
                    Some(catalog) => Ok(catalog),
                    None => Err(DomainError::not_found("no product cache")),
                }
            })
            .await;

        match result {
            Ok(_) => true,
            Err(e) => {
                info!("Product cache unavailable ({e}); catalog will be parsed on first request");
                false
            }
        }
    }

    /// Make sure the catalog is loaded, parsing the raw source if necessary.
    pub async fn ensure_loaded(&self) -> Result<Arc<Catalog>, DomainError> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(Arc::clone(catalog));
        }

        let catalog = self
            .catalog
            .get_or_try_init(|| async {
                if let Some(catalog) = self.load_cached().await? {
                    return Ok(catalog);
                }
                self.load_from_source().await
            })
            .await?;

        Ok(Arc::clone(catalog))
    }

    /// The loaded catalog, or `None` while it is not ready.
    pub fn catalog(&self) -> Option<Arc<Catalog>> {
        self.catalog.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.initialized()
    }

    pub fn lookup(&self, id: i64) -> Option<Product> {
        self.catalog.get()?.lookup(id).cloned()
    }

    async fn load_cached(&self) -> Result<Option<Arc<Catalog>>, DomainError> {
        match self.repository.read_cache().await? {
            Some(products) if !products.is_empty() => {
                info!("Loaded {} products from cache", products.len());
                Ok(Some(Arc::new(Catalog::new(products))))
            }
            Some(_) => {
                warn!("Product cache is empty; ignoring it");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn load_from_source(&self) -> Result<Arc<Catalog>, DomainError> {
        info!("Catalog not loaded, parsing raw source via {}", self.generation_client.provider_name());
        let start_time = Instant::now();

        let raw_source = self.repository.read_raw_source().await?;
        let prompt = catalog_extraction_prompt(&raw_source);
        let response = self.generation_client.generate_text(&prompt).await?;

        let parsed: Vec<ParsedProduct> = parse_structured(&response)?;
        debug!("Model extracted {} product records", parsed.len());

        let catalog = Catalog::from_parsed(parsed);
        if catalog.is_empty() {
            return Err(DomainError::model_output(
                "catalog parsing produced no products",
                response,
            ));
        }

        self.repository.write_cache(catalog.products()).await?;

        info!(
            "Parsed and cached {} products in {:.2}s",
            catalog.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(Arc::new(catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::connector::MockGenerationClient;

    #[derive(Default)]
    struct MemoryCatalogRepository {
        cache: Mutex<Option<Vec<Product>>>,
        raw: Option<String>,
        fail_write: bool,
    }

    #[async_trait]
    impl CatalogRepository for MemoryCatalogRepository {
        async fn read_cache(&self) -> Result<Option<Vec<Product>>, DomainError> {
            Ok(self.cache.lock().unwrap().clone())
        }

        async fn write_cache(&self, products: &[Product]) -> Result<(), DomainError> {
            if self.fail_write {
                return Err(DomainError::persistence("disk full"));
            }
            *self.cache.lock().unwrap() = Some(products.to_vec());
            Ok(())
        }

        async fn read_raw_source(&self) -> Result<String, DomainError> {
            self.raw
                .clone()
                .ok_or_else(|| DomainError::not_found("materials.csv"))
        }
    }

    const RAW: &str = "Короб 200х200 300 руб.\nКрышка 200х200 50 руб.\nВинт М6 2 руб.";
    const PARSED: &str = r#"Готово:
[{"name": "Короб 200х200", "price": 300},
 {"name": "Крышка 200х200", "price": 50},
 {"name": "Винт М6", "price": 2}]"#;

    fn repo_with_raw() -> Arc<MemoryCatalogRepository> {
        Arc::new(MemoryCatalogRepository {
            raw: Some(RAW.to_string()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn parses_raw_source_and_assigns_ids() {
        let repo = repo_with_raw();
        let client = Arc::new(MockGenerationClient::with_responses([PARSED]));
        let store = CatalogStore::new(repo.clone(), client.clone());

        let catalog = store.ensure_loaded().await.unwrap();

        let ids: Vec<i64> = catalog.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.lookup(2).map(|p| p.name), Some("Крышка 200х200".to_string()));
        assert!(client.prompts()[0].contains("Винт М6 2 руб."));

        let cached = repo.cache.lock().unwrap().clone().unwrap();
        assert_eq!(cached.len(), 3);
    }

    #[tokio::test]
    async fn prefers_cache_over_raw_source() {
        let repo = Arc::new(MemoryCatalogRepository {
            cache: Mutex::new(Some(vec![Product::new(7, "Крышка 200х200", 50)])),
            ..Default::default()
        });
        let client = Arc::new(MockGenerationClient::new());
        let store = CatalogStore::new(repo, client.clone());

        let catalog = store.ensure_loaded().await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_parse() {
        let repo = repo_with_raw();
        let client = Arc::new(
            MockGenerationClient::with_responses([PARSED])
                .with_delay(std::time::Duration::from_millis(50)),
        );
        let store = Arc::new(CatalogStore::new(repo, client.clone()));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.ensure_loaded().await }));
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap().len(), 3);
        }

        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn missing_raw_source_fails_and_allows_retry() {
        let repo = Arc::new(MemoryCatalogRepository::default());
        let client = Arc::new(MockGenerationClient::new());
        let store = CatalogStore::new(repo, client);

        assert!(store.ensure_loaded().await.unwrap_err().is_not_found());
        assert!(!store.is_loaded());
    }

    #[tokio::test]
    async fn empty_parse_result_is_an_error_and_retry_succeeds() {
        let repo = repo_with_raw();
        let client = Arc::new(MockGenerationClient::with_responses(["[]", PARSED]));
        let store = CatalogStore::new(repo, client.clone());

        let err = store.ensure_loaded().await.unwrap_err();
        assert!(err.is_model_output());
        assert!(!store.is_loaded());

        let catalog = store.ensure_loaded().await.unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn invalid_model_json_is_model_output_error() {
        let repo = repo_with_raw();
        let client = Arc::new(MockGenerationClient::with_responses([
            r#"[{"name": "Винт", "price": "дорого"}]"#,
        ]));
        let store = CatalogStore::new(repo, client);

        let err = store.ensure_loaded().await.unwrap_err();
        assert!(err.is_model_output());
        assert!(err.raw_model_text().unwrap().contains("дорого"));
    }

    #[tokio::test]
    async fn cache_write_failure_aborts_load() {
        let repo = Arc::new(MemoryCatalogRepository {
            raw: Some(RAW.to_string()),
            fail_write: true,
            ..Default::default()
        });
        let client = Arc::new(MockGenerationClient::with_responses([PARSED]));
        let store = CatalogStore::new(repo, client);

        let err = store.ensure_loaded().await.unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
        assert!(!store.is_loaded());
    }

    #[tokio::test]
    async fn warm_from_cache_never_touches_the_model() {
        let repo = repo_with_raw();
        let client = Arc::new(MockGenerationClient::new());
        let store = CatalogStore::new(repo, client.clone());

        assert!(!store.warm_from_cache().await);
        assert_eq!(client.call_count(), 0);
        assert!(store.catalog().is_none());
    }
}
