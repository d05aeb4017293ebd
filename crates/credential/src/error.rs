//! Error types for credential sourcing.
//!
//! Everything here stays internal to the crate's plumbing: the public
//! provider surface absorbs these into `Option`/`bool` sentinels so
//! callers route on presence, not on error shape.

use thiserror::Error;

/// Why a metadata endpoint was rejected before any request was made.
///
/// Variants deliberately carry the offending host at most, never the full
/// URI, so propagating one into a log line cannot leak path or query
/// configuration.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The configured value is not a parsable URI.
    #[error("metadata endpoint is not a valid URI")]
    Unparsable(#[source] url::ParseError),

    /// The URI has no host component.
    #[error("metadata endpoint has no host")]
    MissingHost,

    /// A plaintext endpoint whose host is neither a well-known
    /// container-metadata address nor loopback.
    #[error("plaintext metadata endpoint host is not an allowed address")]
    ForbiddenHost,

    /// The host did not resolve, so loopback-ness could not be established.
    #[error("metadata endpoint host did not resolve")]
    Unresolvable(#[source] std::io::Error),
}

/// Failure of the HTTP exchange with the metadata endpoint.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS, or timeout failure.
    #[error("credential request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a non-200 status.
    #[error("credential endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The body was not the expected JSON document, or a required field
    /// was missing.
    #[error("credential response could not be parsed: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The `Expiration` field was present but not a valid timestamp.
    #[error("credential response carried an invalid expiration")]
    InvalidExpiration(#[source] chrono::ParseError),
}

/// Any failure along the build → resolve → validate → fetch path.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The provider was constructed with an unusable configuration.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The endpoint was rejected by address validation.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    /// The HTTP exchange failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
