use chrono::{DateTime, Duration, TimeZone, Utc};
use secrecy::{ExposeSecret, SecretString};

/// Margin subtracted from the provider's stated expiry so a token is never
/// used right at the edge of its lifetime.
pub const TOKEN_SAFETY_MARGIN_SECS: i64 = 60;

/// A bearer token and the instant after which it must not be reused.
#[derive(Debug, Clone)]
pub struct AccessToken {
    value: SecretString,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: SecretString::from(value.into()),
            expires_at,
        }
    }

    /// Build a token from the provider's expiry (epoch milliseconds), applying
    /// [`TOKEN_SAFETY_MARGIN_SECS`].
    pub fn from_provider_expiry(value: impl Into<String>, expires_at_millis: i64) -> Option<Self> {
        let stated = Utc.timestamp_millis_opt(expires_at_millis).single()?;
        Some(Self::new(
            value,
            stated - Duration::seconds(TOKEN_SAFETY_MARGIN_SECS),
        ))
    }

    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Valid only while `now` is strictly before the expiry instant.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.value.expose_secret().is_empty() && now < self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}
