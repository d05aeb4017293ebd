//! Container credential provider: endpoint resolution, validation, fetch,
//! and the single-slot cache in front of it all.

use crate::config::ProviderConfig;
use crate::endpoint;
use crate::env::Environment;
use crate::error::CredentialError;
use crate::fetch::CredentialFetcher;
use crate::record::Credentials;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

/// The single entry point for obtaining container credentials.
///
/// Callers ask for credentials and get either a usable record or nothing;
/// every internal failure (rejected endpoint, transport error, malformed
/// body) is absorbed here and surfaced only through the log. A failed
/// refresh never disturbs the cache slot.
///
/// Concurrent callers may both notice a stale cache and fetch in parallel;
/// the exchange is idempotent and rare (about once an hour), so the race
/// is tolerated rather than locked away. The cache lock is never held
/// across an await.
pub struct ContainerCredentialProvider {
    env: Arc<dyn Environment>,
    config: ProviderConfig,
    fetcher: CredentialFetcher,
    cache: RwLock<Option<Credentials>>,
}

impl ContainerCredentialProvider {
    /// Build a provider against the given environment.
    pub fn new(env: Arc<dyn Environment>, config: ProviderConfig) -> Result<Self, CredentialError> {
        config.validate()?;
        let fetcher = CredentialFetcher::new(Arc::clone(&env), &config)?;
        Ok(Self {
            env,
            config,
            fetcher,
            cache: RwLock::new(None),
        })
    }

    /// Whether the execution environment is configured for container
    /// credentials at all. `false` is a routing decision, not an error:
    /// callers fall back to another credential source.
    pub fn should_use_credentials(&self) -> bool {
        endpoint::should_use_credentials(self.env.as_ref())
    }

    /// Return usable credentials, refreshing when the cached record has
    /// less than the configured skew of lifetime left. `None` means the
    /// caller cannot proceed with this source, never "proceed without".
    pub async fn get_credentials(&self) -> Option<Credentials> {
        let now = Utc::now();

        if let Some(cached) = self.cached(now) {
            return Some(cached);
        }

        let uri = endpoint::resolve(self.env.as_ref())?;

        match self.refresh(&uri).await {
            Ok(credentials) => Some(credentials),
            Err(CredentialError::Endpoint(_)) => {
                // The rejected value stays out of the log; it may embed
                // paths or tokens from a hostile environment.
                tracing::warn!("metadata endpoint rejected by address validation");
                None
            }
            Err(error) => {
                tracing::warn!(%error, "credential refresh failed");
                None
            }
        }
    }

    fn cached(&self, now: DateTime<Utc>) -> Option<Credentials> {
        self.cache
            .read()
            .as_ref()
            .filter(|record| record.is_fresh(now, self.config.refresh_skew))
            .cloned()
    }

    async fn refresh(&self, uri: &str) -> Result<Credentials, CredentialError> {
        endpoint::validate(uri).await?;
        let credentials = self.fetcher.fetch(uri).await?;
        tracing::debug!(expires_at = %credentials.expires_at, "refreshed container credentials");
        *self.cache.write() = Some(credentials.clone());
        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StaticEnvironment;
    use crate::secret::SecretString;
    use chrono::Duration;

    fn provider(env: StaticEnvironment) -> ContainerCredentialProvider {
        ContainerCredentialProvider::new(Arc::new(env), ProviderConfig::default())
            .expect("default config is valid")
    }

    fn record(expires_at: DateTime<Utc>) -> Credentials {
        Credentials::new(
            "AKIDCACHED".into(),
            SecretString::new("secret"),
            SecretString::new("token"),
            Some(expires_at),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn unconfigured_environment_yields_nothing() {
        let provider = provider(StaticEnvironment::new());
        assert!(!provider.should_use_credentials());
        assert!(provider.get_credentials().await.is_none());
    }

    #[tokio::test]
    async fn fresh_cache_is_served_without_configuration() {
        // No endpoint variables at all: a hit proves no fetch happened.
        let provider = provider(StaticEnvironment::new());
        *provider.cache.write() = Some(record(Utc::now() + Duration::seconds(400)));

        let served = provider.get_credentials().await.expect("cache hit");
        assert_eq!(served.access_key, "AKIDCACHED");
    }

    #[tokio::test]
    async fn record_inside_skew_is_not_served() {
        let provider = provider(StaticEnvironment::new());
        *provider.cache.write() = Some(record(Utc::now() + Duration::seconds(200)));

        // Inside the 300s skew the cache misses, and with no endpoint
        // configured the refresh path yields nothing.
        assert!(provider.get_credentials().await.is_none());
    }

    #[tokio::test]
    async fn rejected_endpoint_leaves_cache_untouched() {
        let env = StaticEnvironment::new().with(endpoint::ENV_FULL_URI, "http://8.8.8.8/creds");
        let provider = provider(env);
        *provider.cache.write() = Some(record(Utc::now() + Duration::seconds(100)));

        assert!(provider.get_credentials().await.is_none());
        assert!(provider.cache.read().is_some(), "failed refresh must not evict");
    }
}
