//! Test doubles for the host collaborator seams.

use crate::batch::{InvalidationBatch, InvalidationReceipt, InvalidationRequest};
use crate::error::{CdnError, ScheduleError, StoreError};
use crate::traits::{BatchStore, CdnClient, JobScheduler};
use async_trait::async_trait;
use parking_lot::Mutex;
use purgeflow_credential::{ContainerCredentialProvider, Credentials, ProviderConfig, StaticEnvironment};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

/// Scheduler double that models the replace-not-stack contract.
#[derive(Default)]
pub(crate) struct RecordingScheduler {
    pending: Mutex<HashMap<String, Duration>>,
    schedule_calls: AtomicU32,
    fail_next_schedule: AtomicBool,
}

impl RecordingScheduler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn pending_delay(&self, hook: &str) -> Option<Duration> {
        self.pending.lock().get(hook).copied()
    }

    pub(crate) fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    pub(crate) fn schedule_calls(&self) -> u32 {
        self.schedule_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_next_schedule(&self) {
        self.fail_next_schedule.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl JobScheduler for RecordingScheduler {
    async fn schedule_once(&self, hook: &str, delay: Duration) -> Result<(), ScheduleError> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_schedule.swap(false, Ordering::SeqCst) {
            return Err(ScheduleError("simulated scheduling failure".into()));
        }
        self.pending.lock().insert(hook.to_owned(), delay);
        Ok(())
    }

    async fn cancel(&self, hook: &str) -> Result<(), ScheduleError> {
        self.pending.lock().remove(hook);
        Ok(())
    }
}

/// CDN client double recording every request it receives.
#[derive(Default)]
pub(crate) struct RecordingCdnClient {
    calls: Mutex<Vec<(InvalidationRequest, bool)>>,
    fail_next: AtomicBool,
}

impl RecordingCdnClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<(InvalidationRequest, bool)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl CdnClient for RecordingCdnClient {
    async fn create_invalidation(
        &self,
        request: &InvalidationRequest,
        credentials: Option<&Credentials>,
    ) -> Result<InvalidationReceipt, CdnError> {
        self.calls
            .lock()
            .push((request.clone(), credentials.is_some()));
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(CdnError("simulated control-plane failure".into()));
        }
        Ok(InvalidationReceipt {
            id: Some("I2J0SM14XHKKPX".into()),
            status: Some("InProgress".into()),
        })
    }
}

/// Batch store double with failure injection.
#[derive(Default)]
pub(crate) struct FlakyBatchStore {
    slot: Mutex<Option<InvalidationBatch>>,
    fail_next_load: AtomicBool,
    fail_next_save: AtomicBool,
}

impl FlakyBatchStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_next_load(&self) {
        self.fail_next_load.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }

    pub(crate) fn contents(&self) -> Option<InvalidationBatch> {
        self.slot.lock().clone()
    }
}

#[async_trait]
impl BatchStore for FlakyBatchStore {
    async fn load(&self) -> Result<Option<InvalidationBatch>, StoreError> {
        if self.fail_next_load.swap(false, Ordering::SeqCst) {
            return Err(StoreError("simulated load failure".into()));
        }
        Ok(self.slot.lock().clone())
    }

    async fn save(&self, batch: &InvalidationBatch) -> Result<(), StoreError> {
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(StoreError("simulated save failure".into()));
        }
        *self.slot.lock() = Some(batch.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock() = None;
        Ok(())
    }
}

/// A provider whose environment carries no endpoint configuration: the
/// dispatcher will pass `None` credentials straight through.
pub(crate) fn inactive_provider() -> Arc<ContainerCredentialProvider> {
    Arc::new(
        ContainerCredentialProvider::new(
            Arc::new(StaticEnvironment::new()),
            ProviderConfig::default(),
        )
        .expect("default config is valid"),
    )
}
