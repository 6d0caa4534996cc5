use async_trait::async_trait;

use crate::domain::{DomainError, Product};

/// Storage behind the product catalog: the raw source document and the cache
/// of already-parsed products.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Read the cached product list. Returns `None` when there is no cache or
    /// it cannot be parsed.
    async fn read_cache(&self) -> Result<Option<Vec<Product>>, DomainError>;

    /// Replace the cache with `products`.
    async fn write_cache(&self, products: &[Product]) -> Result<(), DomainError>;

    /// Read the unstructured source document, one product per line.
    async fn read_raw_source(&self) -> Result<String, DomainError>;
}
