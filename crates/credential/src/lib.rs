//! Container credential sourcing for purgeflow.
//!
//! Resolves a metadata endpoint from the execution environment, refuses
//! to talk plaintext to anything that is not a well-known link-local
//! metadata address or loopback, and caches the fetched temporary
//! credentials with a refresh skew so callers never hold a record that
//! expires mid-request.
//!
//! # Example
//!
//! ```no_run
//! use purgeflow_credential::{ContainerCredentialProvider, ProcessEnvironment, ProviderConfig};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let provider = ContainerCredentialProvider::new(
//!     Arc::new(ProcessEnvironment),
//!     ProviderConfig::default(),
//! )
//! .expect("valid config");
//!
//! if provider.should_use_credentials() {
//!     match provider.get_credentials().await {
//!         Some(credentials) => { /* sign the CDN request */ }
//!         None => { /* cannot proceed with this source */ }
//!     }
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod endpoint;
pub mod env;
pub mod error;
mod fetch;
pub mod provider;
mod record;
mod secret;

pub use config::{ConfigError, ProviderConfig};
pub use env::{Environment, ProcessEnvironment, StaticEnvironment};
pub use error::{CredentialError, EndpointError, FetchError};
pub use provider::ContainerCredentialProvider;
pub use record::Credentials;
pub use secret::SecretString;
