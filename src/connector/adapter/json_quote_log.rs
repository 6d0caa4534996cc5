use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::application::QuoteLog;
use crate::domain::{DomainError, Quote};

pub const DEFAULT_LOG_DIR: &str = "logs";

/// Writes each assembled quote as its own pretty-printed JSON file.
pub struct JsonQuoteLog {
    dir: PathBuf,
}

impl JsonQuoteLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn next_file_name() -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!(
            "log_{}_{}.json",
            Utc::now().format("%Y%m%d_%H%M%S"),
            &id[..8]
        )
    }
}

#[async_trait]
impl QuoteLog for JsonQuoteLog {
    async fn record(&self, quote: &Quote) -> Result<PathBuf, DomainError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            DomainError::persistence(format!("failed to create {}: {e}", self.dir.display()))
        })?;

        let json = serde_json::to_string_pretty(&quote.log_record())
            .map_err(|e| DomainError::persistence(format!("failed to serialize log record: {e}")))?;

        let path = self.dir.join(Self::next_file_name());
        tokio::fs::write(&path, json).await.map_err(|e| {
            DomainError::persistence(format!("failed to write {}: {e}", path.display()))
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineItem, Product};
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_one_file_per_record() {
        let dir = TempDir::new().unwrap();
        let log = JsonQuoteLog::new(dir.path().join("logs"));
        let product = Product::new(7, "Крышка 200х200", 50);
        let line = LineItem::new(&product, 2).unwrap();
        let quote = Quote::new("крышка 200 мм", vec![line]).unwrap();

        let first = log.record(&quote).await.unwrap();
        let second = log.record(&quote).await.unwrap();
        assert_ne!(first, second);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&first).unwrap()).unwrap();
        assert_eq!(value["query"], "крышка 200 мм");
        assert_eq!(value["response"]["total_cost"], 100);
        assert_eq!(value["response"]["found_items"][0]["price"], 50);
        assert_eq!(value["response"]["found_items"][0]["subtotal"], 100);
    }
}
