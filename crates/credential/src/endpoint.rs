//! Metadata endpoint resolution and address validation.
//!
//! The endpoint URI comes from environment variables a container runtime
//! injects. Since a misconfigured or hostile value would make this crate
//! send an authorization token to an arbitrary host, every plaintext
//! endpoint must be one of the well-known link-local metadata addresses or
//! resolve to loopback before a request is issued.

use crate::env::Environment;
use crate::error::EndpointError;
use std::net::IpAddr;
use url::Url;

/// Relative-path form of the credential endpoint.
pub const ENV_RELATIVE_URI: &str = "AWS_CONTAINER_CREDENTIALS_RELATIVE_URI";
/// Full-URI form of the credential endpoint.
pub const ENV_FULL_URI: &str = "AWS_CONTAINER_CREDENTIALS_FULL_URI";
/// Authorization token passed verbatim.
pub const ENV_AUTH_TOKEN: &str = "AWS_CONTAINER_AUTHORIZATION_TOKEN";
/// Path of a file holding the authorization token.
pub const ENV_AUTH_TOKEN_FILE: &str = "AWS_CONTAINER_AUTHORIZATION_TOKEN_FILE";

/// Base the relative form is resolved against.
const TASK_ENDPOINT_BASE: &str = "http://169.254.170.2";

/// Link-local task credential address.
const TASK_HOST_V4: &str = "169.254.170.2";
/// Link-local pod-identity address (IPv4).
const POD_IDENTITY_HOST_V4: &str = "169.254.170.23";
/// Link-local pod-identity address (IPv6).
const POD_IDENTITY_HOST_V6: &str = "fd00:ec2::23";

/// Whether the environment is configured for container credentials at all.
/// `false` means callers should fall back to another credential source.
pub fn should_use_credentials(env: &dyn Environment) -> bool {
    env.var(ENV_RELATIVE_URI).is_some() || env.var(ENV_FULL_URI).is_some()
}

/// Derive the credential endpoint from the environment.
///
/// The relative form wins and is anchored to the link-local task address;
/// the full form is taken verbatim. `None` means the provider is inactive.
pub fn resolve(env: &dyn Environment) -> Option<String> {
    if let Some(relative) = env.var(ENV_RELATIVE_URI) {
        return Some(format!("{TASK_ENDPOINT_BASE}{relative}"));
    }
    env.var(ENV_FULL_URI)
}

/// Validate an endpoint before fetching from it.
///
/// TLS endpoints are accepted unconditionally (cross-account delegation
/// hosts are public and certificate-pinned by the TLS stack). Plaintext
/// endpoints must be a well-known metadata address, a literal loopback
/// address, or a name whose every resolved address is loopback.
pub async fn validate(uri: &str) -> Result<(), EndpointError> {
    let parsed = Url::parse(uri).map_err(EndpointError::Unparsable)?;

    if parsed.scheme() == "https" {
        return Ok(());
    }

    let host = parsed
        .host_str()
        .ok_or(EndpointError::MissingHost)?
        .trim_matches(['[', ']']);

    if host == TASK_HOST_V4 || host == POD_IDENTITY_HOST_V4 || host == POD_IDENTITY_HOST_V6 {
        return Ok(());
    }

    if let Ok(addr) = host.parse::<IpAddr>() {
        return if addr.is_loopback() {
            Ok(())
        } else {
            Err(EndpointError::ForbiddenHost)
        };
    }

    resolves_to_loopback(host).await
}

/// A hostname passes only when every address it resolves to is loopback;
/// a single non-loopback record is enough to reject it.
async fn resolves_to_loopback(host: &str) -> Result<(), EndpointError> {
    let addrs = tokio::net::lookup_host((host, 80))
        .await
        .map_err(EndpointError::Unresolvable)?
        .collect::<Vec<_>>();

    if addrs.is_empty() {
        return Err(EndpointError::Unresolvable(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "host resolved to no addresses",
        )));
    }

    if addrs.iter().all(|addr| addr.ip().is_loopback()) {
        Ok(())
    } else {
        Err(EndpointError::ForbiddenHost)
    }
}
