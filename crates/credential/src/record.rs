//! Temporary credential record returned by the metadata endpoint.

use crate::secret::SecretString;
use chrono::{DateTime, Duration, Utc};
use std::fmt;

/// A set of temporary credentials with an absolute expiry.
///
/// Immutable once constructed; the provider replaces the whole record on
/// refresh rather than mutating fields.
#[derive(Clone)]
pub struct Credentials {
    /// Access key identifier. Not secret by itself.
    pub access_key: String,
    /// Secret access key.
    pub secret_key: SecretString,
    /// Session token bound to the key pair.
    pub session_token: SecretString,
    /// Absolute expiry of the record.
    pub expires_at: DateTime<Utc>,
}

impl Credentials {
    /// Construct a record, defaulting the expiry to `issued_at` + 1 hour
    /// when the source supplied none.
    pub fn new(
        access_key: String,
        secret_key: SecretString,
        session_token: SecretString,
        expires_at: Option<DateTime<Utc>>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_key,
            secret_key,
            session_token,
            expires_at: expires_at.unwrap_or(issued_at + Duration::hours(1)),
        }
    }

    /// Whether the record is still usable at `now`, leaving `skew` of
    /// validity in reserve so callers never hold a credential that expires
    /// mid-request.
    #[must_use]
    pub fn is_fresh(&self, now: DateTime<Utc>, skew: std::time::Duration) -> bool {
        match Duration::from_std(skew) {
            Ok(skew) => now < self.expires_at - skew,
            Err(_) => false,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
