//! Provider configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tuning knobs for the container credential provider.
///
/// The defaults match the metadata-endpoint contract and rarely need
/// changing; hosts mostly deserialize this from their settings layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Bound on the credential fetch round trip.
    #[serde(with = "humantime_serde")]
    pub fetch_timeout: Duration,

    /// Validity held in reserve: a cached record is refreshed once less
    /// than this much lifetime remains.
    #[serde(with = "humantime_serde")]
    pub refresh_skew: Duration,

    /// Assumed lifetime for responses that carry no `Expiration`.
    #[serde(with = "humantime_serde")]
    pub default_ttl: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(5),
            refresh_skew: Duration::from_secs(300),
            default_ttl: Duration::from_secs(3600),
        }
    }
}

impl ProviderConfig {
    /// Reject configurations that would stall requests or thrash the
    /// endpoint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timeout = self.fetch_timeout.as_secs();
        if !(1..=60).contains(&timeout) {
            return Err(ConfigError::InvalidValue {
                field: "fetch_timeout",
                reason: format!("must be between 1 and 60 seconds, got {timeout} seconds"),
            });
        }

        if self.refresh_skew >= self.default_ttl {
            return Err(ConfigError::InvalidValue {
                field: "refresh_skew",
                reason: "must be smaller than default_ttl or every record is born stale".into(),
            });
        }

        Ok(())
    }
}

/// Configuration validation failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A field holds a value outside its permitted range.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Offending field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
