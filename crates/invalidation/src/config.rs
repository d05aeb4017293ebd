//! Invalidation pipeline configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

fn default_published_status() -> String {
    "publish".to_owned()
}

/// Settings for the invalidation scheduler and dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidationConfig {
    /// CDN distribution receiving the invalidations.
    pub distribution_id: String,

    /// Content status counting as "published". A transition into or out
    /// of this status is what makes a change event purge-worthy.
    #[serde(default = "default_published_status")]
    pub published_status: String,
}

impl InvalidationConfig {
    /// Config targeting a distribution, with default status marker.
    pub fn for_distribution(distribution_id: impl Into<String>) -> Self {
        Self {
            distribution_id: distribution_id.into(),
            published_status: default_published_status(),
        }
    }

    /// Reject configurations that cannot address a distribution.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.distribution_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "distribution_id",
                reason: "must not be empty".into(),
            });
        }
        if self.published_status.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "published_status",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}
