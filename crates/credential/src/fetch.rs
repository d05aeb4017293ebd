//! HTTP exchange with the metadata endpoint.

use crate::config::ProviderConfig;
use crate::env::Environment;
use crate::endpoint::{ENV_AUTH_TOKEN, ENV_AUTH_TOKEN_FILE};
use crate::error::FetchError;
use crate::record::Credentials;
use crate::secret::SecretString;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

/// Response document of the credential endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct WireCredentials {
    #[serde(rename = "AccessKeyId")]
    access_key_id: String,
    #[serde(rename = "SecretAccessKey")]
    secret_access_key: String,
    #[serde(rename = "Token")]
    token: String,
    #[serde(rename = "Expiration")]
    expiration: Option<String>,
}

impl WireCredentials {
    fn into_credentials(self, issued_at: DateTime<Utc>) -> Result<Credentials, FetchError> {
        let expires_at = self
            .expiration
            .map(|raw| {
                DateTime::parse_from_rfc3339(&raw)
                    .map(|ts| ts.with_timezone(&Utc))
                    .map_err(FetchError::InvalidExpiration)
            })
            .transpose()?;

        Ok(Credentials::new(
            self.access_key_id,
            SecretString::new(self.secret_access_key),
            SecretString::new(self.token),
            expires_at,
            issued_at,
        ))
    }
}

/// Performs the GET against a validated endpoint and normalizes the
/// response into a [`Credentials`] record.
pub struct CredentialFetcher {
    client: reqwest::Client,
    env: Arc<dyn Environment>,
}

impl CredentialFetcher {
    /// Build a fetcher with the configured request timeout.
    pub fn new(env: Arc<dyn Environment>, config: &ProviderConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()
            .map_err(FetchError::Transport)?;
        Ok(Self { client, env })
    }

    /// Fetch credentials from `uri`.
    ///
    /// Attaches the authorization token when one is configured. Any
    /// transport error, non-200 status, or malformed body is a failure;
    /// the caller decides what absence means.
    pub async fn fetch(&self, uri: &str) -> Result<Credentials, FetchError> {
        let mut request = self.client.get(uri);
        if let Some(token) = self.authorization_token().await {
            request = request.header("Authorization", token);
        }

        let response = request.send().await.map_err(FetchError::Transport)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await.map_err(FetchError::Transport)?;
        let wire: WireCredentials = serde_json::from_str(&body).map_err(FetchError::Malformed)?;
        wire.into_credentials(Utc::now())
    }

    /// Resolve the authorization token: file contents first, then the
    /// plain variable. An unreadable or empty file falls through rather
    /// than failing the fetch.
    async fn authorization_token(&self) -> Option<String> {
        if let Some(path) = self.env.var(ENV_AUTH_TOKEN_FILE) {
            match tokio::fs::read_to_string(&path).await {
                Ok(contents) => {
                    let token = contents.trim_end();
                    if !token.is_empty() {
                        return Some(token.to_owned());
                    }
                }
                Err(error) => {
                    tracing::debug!(%error, "authorization token file unreadable, trying variable");
                }
            }
        }
        self.env.var(ENV_AUTH_TOKEN)
    }
}
