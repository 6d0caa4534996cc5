use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::CatalogRepository;
use crate::domain::{DomainError, Product};

pub const DEFAULT_SOURCE_PATH: &str = "materials.csv";
pub const DEFAULT_CACHE_PATH: &str = "products.json";

/// Raw price list and parsed-product cache kept as plain files.
pub struct FileCatalogRepository {
    source_path: PathBuf,
    cache_path: PathBuf,
}

impl FileCatalogRepository {
    pub fn new(source_path: impl Into<PathBuf>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            cache_path: cache_path.into(),
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }
}

impl Default for FileCatalogRepository {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_PATH, DEFAULT_CACHE_PATH)
    }
}

#[async_trait]
impl CatalogRepository for FileCatalogRepository {
    async fn read_cache(&self) -> Result<Option<Vec<Product>>, DomainError> {
        let content = match tokio::fs::read_to_string(&self.cache_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No product cache at {}", self.cache_path.display());
                return Ok(None);
            }
            Err(e) => {
                warn!(
                    "Failed to read product cache {}: {e}",
                    self.cache_path.display()
                );
                return Ok(None);
            }
        };

        match serde_json::from_str::<Vec<Product>>(&content) {
            Ok(products) => Ok(Some(products)),
            Err(e) => {
                warn!(
                    "Product cache {} is not valid JSON ({e}); ignoring it",
                    self.cache_path.display()
                );
                Ok(None)
            }
        }
    }

    async fn write_cache(&self, products: &[Product]) -> Result<(), DomainError> {
        let json = serde_json::to_string_pretty(products)
            .map_err(|e| DomainError::persistence(format!("failed to serialize products: {e}")))?;

        if let Some(parent) = self.cache_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::persistence(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        // Write beside the target and rename so readers never see a partial file.
        let tmp_path = self.cache_path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await.map_err(|e| {
            DomainError::persistence(format!("failed to write {}: {e}", tmp_path.display()))
        })?;
        tokio::fs::rename(&tmp_path, &self.cache_path)
            .await
            .map_err(|e| {
                DomainError::persistence(format!(
                    "failed to write {}: {e}",
                    self.cache_path.display()
                ))
            })?;

        debug!(
            "Wrote {} products to {}",
            products.len(),
            self.cache_path.display()
        );
        Ok(())
    }

    async fn read_raw_source(&self) -> Result<String, DomainError> {
        match tokio::fs::read_to_string(&self.source_path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(DomainError::not_found(format!(
                "raw catalog source {} does not exist",
                self.source_path.display()
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repository(dir: &TempDir) -> FileCatalogRepository {
        FileCatalogRepository::new(
            dir.path().join("materials.csv"),
            dir.path().join("cache").join("products.json"),
        )
    }

    #[tokio::test]
    async fn missing_cache_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(repository(&dir).read_cache().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn cache_round_trips_through_disk() {
        let dir = TempDir::new().unwrap();
        let repo = repository(&dir);
        let products = vec![
            Product::new(1, "Короб 200х200", 300),
            Product::new(2, "Крышка 200х200", 50),
        ];

        repo.write_cache(&products).await.unwrap();
        let loaded = repo.read_cache().await.unwrap().unwrap();

        assert_eq!(loaded, products);
        let on_disk = std::fs::read_to_string(repo.cache_path()).unwrap();
        assert!(on_disk.contains("\n  {"));
    }

    #[tokio::test]
    async fn corrupt_cache_is_ignored() {
        let dir = TempDir::new().unwrap();
        let repo = repository(&dir);
        std::fs::create_dir_all(repo.cache_path().parent().unwrap()).unwrap();
        std::fs::write(repo.cache_path(), "{not json").unwrap();

        assert!(repo.read_cache().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_raw_source_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = repository(&dir).read_raw_source().await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn reads_raw_source_verbatim() {
        let dir = TempDir::new().unwrap();
        let repo = repository(&dir);
        std::fs::write(repo.source_path(), "Винт М6 2 руб.\n").unwrap();

        assert_eq!(repo.read_raw_source().await.unwrap(), "Винт М6 2 руб.\n");
    }
}
