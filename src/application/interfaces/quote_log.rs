use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::{DomainError, Quote};

/// Append-only record of assembled quotes.
#[async_trait]
pub trait QuoteLog: Send + Sync {
    /// Persist one record and return where it was written.
    async fn record(&self, quote: &Quote) -> Result<PathBuf, DomainError>;
}
