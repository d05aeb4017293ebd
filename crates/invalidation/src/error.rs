//! Error types for the invalidation pipeline.
//!
//! Host-facing collaborators report failures through these; the scheduler
//! absorbs them into its boolean results, so nothing here escapes past
//! the flush handler.

use thiserror::Error;

/// Failure of the persisted batch store.
#[derive(Debug, Error)]
#[error("batch store failure: {0}")]
pub struct StoreError(pub String);

/// Failure of the host's job scheduler.
#[derive(Debug, Error)]
#[error("scheduler failure: {0}")]
pub struct ScheduleError(pub String);

/// Failure reported by the CDN control plane.
#[derive(Debug, Error)]
#[error("CDN invalidation failed: {0}")]
pub struct CdnError(pub String);

/// Why a dispatch did not reach the CDN, or failed there.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The container credential source is configured but yielded nothing;
    /// dispatching unauthenticated is never an option.
    #[error("container credentials unavailable, dispatch refused")]
    CredentialsUnavailable,

    /// The CDN call itself failed.
    #[error(transparent)]
    Cdn(#[from] CdnError),
}

/// Configuration validation failure.
#[derive(Debug, Error)]
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_error_wraps_cdn_failures() {
        let err: DispatchError = CdnError("AccessDenied".into()).into();
        assert!(err.to_string().contains("AccessDenied"));
    }
}
