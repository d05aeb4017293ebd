//! CDN dispatch: credentials in, invalidation out.

use crate::batch::{InvalidationReceipt, InvalidationRequest};
use crate::error::DispatchError;
use crate::traits::CdnClient;
use purgeflow_credential::ContainerCredentialProvider;
use std::sync::Arc;

/// Issues invalidation calls against the CDN control plane.
///
/// When the container credential environment is active, credentials are
/// resolved through the provider and handed to the client; when it is
/// not, the client falls back to whatever credential chain it was built
/// with. Absent credentials from an active source refuse the dispatch;
/// there is no unauthenticated mode.
pub struct CdnDispatcher {
    provider: Arc<ContainerCredentialProvider>,
    client: Arc<dyn CdnClient>,
}

impl CdnDispatcher {
    /// Compose a dispatcher from its two collaborators.
    pub fn new(provider: Arc<ContainerCredentialProvider>, client: Arc<dyn CdnClient>) -> Self {
        Self { provider, client }
    }

    /// Submit `request`, returning the CDN's raw outcome. Callers own
    /// logging and reaction; nothing is interpreted here.
    pub async fn create_invalidation(
        &self,
        request: &InvalidationRequest,
    ) -> Result<InvalidationReceipt, DispatchError> {
        let credentials = if self.provider.should_use_credentials() {
            match self.provider.get_credentials().await {
                Some(credentials) => Some(credentials),
                None => return Err(DispatchError::CredentialsUnavailable),
            }
        } else {
            None
        };

        self.client
            .create_invalidation(request, credentials.as_ref())
            .await
            .map_err(DispatchError::from)
    }
}
