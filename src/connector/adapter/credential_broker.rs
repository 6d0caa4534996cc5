use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::application::TokenExchange;
use crate::domain::{AccessToken, DomainError};

/// Caches the cloud provider's access token and refreshes it when it expires.
///
/// The check-refresh-store sequence runs under one async mutex, so at most one
/// exchange is in flight; callers queued behind it read the fresh token.
pub struct CredentialBroker {
    exchange: Arc<dyn TokenExchange>,
    token: Mutex<Option<AccessToken>>,
}

impl CredentialBroker {
    pub fn new(exchange: Arc<dyn TokenExchange>) -> Self {
        Self {
            exchange,
            token: Mutex::new(None),
        }
    }

    /// Start with an already obtained token.
    pub fn with_token(exchange: Arc<dyn TokenExchange>, token: AccessToken) -> Self {
        Self {
            exchange,
            token: Mutex::new(Some(token)),
        }
    }

    /// A token that is valid right now. Exchange failures are returned as is;
    /// there is no retry.
    pub async fn get_token(&self) -> Result<AccessToken, DomainError> {
        let mut cached = self.token.lock().await;

        if let Some(ref token) = *cached {
            if token.is_valid() {
                return Ok(token.clone());
            }
            debug!("Access token expired at {}", token.expires_at());
        }

        info!("Requesting a new access token");
        let fresh = self.exchange.exchange().await?;
        debug!("New access token valid until {}", fresh.expires_at());

        *cached = Some(fresh.clone());
        Ok(fresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;

    struct CountingExchange {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingExchange {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl TokenExchange for CountingExchange {
        async fn exchange(&self) -> Result<AccessToken, DomainError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail {
                return Err(DomainError::auth("401 Unauthorized"));
            }
            Ok(AccessToken::new(
                format!("token-{n}"),
                Utc::now() + chrono::Duration::minutes(30),
            ))
        }
    }

    fn expired() -> AccessToken {
        AccessToken::new("stale", Utc::now() - chrono::Duration::seconds(1))
    }

    #[tokio::test]
    async fn reuses_valid_token() {
        let exchange = Arc::new(CountingExchange::new());
        let broker = CredentialBroker::new(exchange.clone());

        let first = broker.get_token().await.unwrap();
        let second = broker.get_token().await.unwrap();

        assert_eq!(first.expose(), second.expose());
        assert_eq!(exchange.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_callers_with_expired_token_trigger_one_refresh() {
        let exchange = Arc::new(CountingExchange::new());
        let broker = Arc::new(CredentialBroker::with_token(exchange.clone(), expired()));

        let mut handles = Vec::new();
        for _ in 0..10 {
            let broker = Arc::clone(&broker);
            handles.push(tokio::spawn(async move { broker.get_token().await }));
        }

        for handle in handles {
            let token = handle.await.unwrap().unwrap();
            assert_eq!(token.expose(), "token-1");
        }
        assert_eq!(exchange.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exchange_failure_is_returned_and_nothing_is_cached() {
        let exchange = Arc::new(CountingExchange {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let broker = CredentialBroker::new(exchange.clone());

        assert!(matches!(
            broker.get_token().await,
            Err(DomainError::Auth(_))
        ));
        assert!(broker.get_token().await.is_err());
        assert_eq!(exchange.calls.load(Ordering::SeqCst), 2);
    }
}
