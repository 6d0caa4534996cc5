use async_trait::async_trait;

use crate::domain::{AccessToken, DomainError};

/// Exchanges long-lived credentials for a short-lived bearer token.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Perform one exchange against the identity endpoint. Failures surface as
    /// [`DomainError::Auth`].
    async fn exchange(&self) -> Result<AccessToken, DomainError>;
}
