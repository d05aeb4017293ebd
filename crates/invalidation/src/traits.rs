//! Host collaborator seams.
//!
//! The scheduler never reaches for ambient state: storage, timing, the
//! kill switch, and the CDN client are all constructor-injected behind
//! these traits, each small enough to carry a one-struct test double.

use crate::batch::{InvalidationBatch, InvalidationReceipt, InvalidationRequest};
use crate::error::{CdnError, ScheduleError, StoreError};
use async_trait::async_trait;
use purgeflow_credential::Credentials;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Durable storage for the pending batch. One slot, host-owned, expected
/// to survive process restarts.
#[async_trait]
pub trait BatchStore: Send + Sync {
    /// Read the pending batch, if any.
    async fn load(&self) -> Result<Option<InvalidationBatch>, StoreError>;

    /// Replace the pending batch.
    async fn save(&self, batch: &InvalidationBatch) -> Result<(), StoreError>;

    /// Drop the pending batch.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// The host's deferred-job primitive.
///
/// Contract: at most one pending registration per hook. Arming an
/// already-armed hook replaces the earlier registration, and the host
/// fires the handler at most once per armed registration.
#[async_trait]
pub trait JobScheduler: Send + Sync {
    /// Arm a one-shot job `delay` from now.
    async fn schedule_once(&self, hook: &str, delay: Duration) -> Result<(), ScheduleError>;

    /// Drop any pending registration for `hook`.
    async fn cancel(&self, hook: &str) -> Result<(), ScheduleError>;
}

/// Operator-facing kill switch for scheduled flushes, togglable at
/// runtime without a redeploy.
pub trait DisableSwitch: Send + Sync {
    /// Whether deferred invalidation is currently disabled.
    fn is_cron_retry_disabled(&self) -> bool;
}

/// In-process [`DisableSwitch`] backed by an atomic flag.
#[derive(Debug, Default)]
pub struct ToggleSwitch {
    disabled: AtomicBool,
}

impl ToggleSwitch {
    /// Switch starting in the enabled (not disabled) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the switch.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }
}

impl DisableSwitch for ToggleSwitch {
    fn is_cron_retry_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }
}

/// The network boundary to the CDN control plane.
///
/// Implementations receive the resolved request plus the container
/// credentials when that source is active; with `None` they are expected
/// to use their own configured credential chain.
#[async_trait]
pub trait CdnClient: Send + Sync {
    /// Submit the invalidation and return the CDN's raw answer.
    async fn create_invalidation(
        &self,
        request: &InvalidationRequest,
        credentials: Option<&Credentials>,
    ) -> Result<InvalidationReceipt, CdnError>;
}
