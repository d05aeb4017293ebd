//! Debounced flush scheduling over the persisted batch.
//!
//! Change events accumulate paths into a single stored batch while a
//! one-shot deferred flush is (re-)armed a minute out. The flush drains
//! the batch through the dispatcher exactly once; failures are logged
//! and the batch is still spent. Recovery from a failed dispatch is the
//! operator's call, via the kill switch and fresh change events.

use crate::batch::{InvalidationBatch, InvalidationQuery, InvalidationRequest};
use crate::config::InvalidationConfig;
use crate::dispatch::CdnDispatcher;
use crate::error::ConfigError;
use crate::log::DebugLog;
use crate::traits::{BatchStore, DisableSwitch, JobScheduler};
use std::sync::Arc;
use std::time::Duration;

/// Hook identifier the deferred flush is registered under. A single key
/// means a single pending flush: re-arming replaces, never stacks.
pub const FLUSH_HOOK: &str = "purgeflow_invalidation_flush";

/// How far out a flush is armed. Every registration inside this window
/// lands in the same flush.
pub const FLUSH_DELAY: Duration = Duration::from_secs(60);

/// Coalesces change events into batched, deferred invalidation flushes.
pub struct InvalidationScheduler {
    config: InvalidationConfig,
    store: Arc<dyn BatchStore>,
    jobs: Arc<dyn JobScheduler>,
    switch: Arc<dyn DisableSwitch>,
    dispatcher: CdnDispatcher,
    log: DebugLog,
}

impl InvalidationScheduler {
    /// Compose a scheduler from its collaborators.
    pub fn new(
        config: InvalidationConfig,
        store: Arc<dyn BatchStore>,
        jobs: Arc<dyn JobScheduler>,
        switch: Arc<dyn DisableSwitch>,
        dispatcher: CdnDispatcher,
        log: DebugLog,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            store,
            jobs,
            switch,
            dispatcher,
            log,
        })
    }

    /// Whether a content-status transition warrants an invalidation:
    /// exactly one side of the transition is the published status. A
    /// draft edit (neither side published) or a published-to-published
    /// update (both sides) does not purge.
    #[must_use]
    pub fn should_invalidate(&self, new_status: &str, old_status: &str) -> bool {
        let marker = self.config.published_status.as_str();
        (new_status == marker) != (old_status == marker)
    }

    /// Fold `query` into the pending batch and arm the deferred flush.
    ///
    /// Returns `true` when a flush was (re-)armed. Refusals (operator
    /// kill switch, empty path list, wildcard batch) are expected
    /// control flow and come back as `false`, as do collaborator
    /// failures, which additionally land in the log.
    pub async fn register_cron_event(&self, query: &InvalidationQuery) -> bool {
        if self.switch.is_cron_retry_disabled() {
            self.log.registration_skipped("cron retry disabled");
            return false;
        }

        if query.paths.is_empty() {
            self.log.registration_skipped("no target paths");
            return false;
        }

        if query.paths.contains_wildcard() {
            self.log
                .registration_skipped("wildcard batch is dispatched directly, never scheduled");
            return false;
        }

        self.log.invalidation_params("registration query", &query.paths);

        let batch = match self.store.load().await {
            Ok(Some(mut existing)) => {
                existing.merge(&query.paths);
                existing
            }
            Ok(None) => InvalidationBatch::new(query.paths.clone()),
            Err(error) => {
                tracing::warn!(%error, "could not load pending batch");
                return false;
            }
        };

        if let Err(error) = self.store.save(&batch).await {
            tracing::warn!(%error, "could not persist pending batch");
            return false;
        }

        if let Err(error) = self.jobs.cancel(FLUSH_HOOK).await {
            tracing::debug!(%error, "no pending flush to cancel");
        }
        if let Err(error) = self.jobs.schedule_once(FLUSH_HOOK, FLUSH_DELAY).await {
            tracing::warn!(%error, "could not arm deferred flush");
            return false;
        }

        self.log.registration_completed(batch.paths.len());
        true
    }

    /// Drain the pending batch through the dispatcher. Invoked by the
    /// host scheduler when the armed flush fires.
    ///
    /// Returns `true` when a dispatch was attempted. The batch is spent
    /// on any dispatch outcome; a skipped flush (kill switch, empty
    /// batch) leaves it in place for a future trigger.
    pub async fn run_scheduled_flush(&self) -> bool {
        self.log.cron_started();

        if self.switch.is_cron_retry_disabled() {
            self.log.cron_skipped("disabled by operator switch");
            return false;
        }

        let batch = match self.store.load().await {
            Ok(Some(batch)) if !batch.paths.is_empty() => batch,
            Ok(_) => {
                self.log.cron_skipped("no target paths");
                return false;
            }
            Err(error) => {
                tracing::warn!(%error, "could not load pending batch");
                self.log.cron_skipped("batch store unavailable");
                return false;
            }
        };

        let request = InvalidationRequest {
            distribution_id: self.config.distribution_id.clone(),
            batch,
        };
        self.log.invalidation_params("invalidation request", &request);

        match self.dispatcher.create_invalidation(&request).await {
            Ok(receipt) => self.log.dispatch_succeeded(&receipt),
            Err(error) => self.log.dispatch_failed(&error),
        }

        // Fire-once: the batch is spent whether or not the CDN took it.
        if let Err(error) = self.store.clear().await {
            tracing::warn!(%error, "could not clear dispatched batch");
        }

        self.log.cron_completed();
        true
    }
}
