//! Category-toggled debug logging.
//!
//! Operators flip two independent switches: one for the flush lifecycle
//! (started / skipped / completed), one for invalidation parameters
//! (batch contents, request payloads). Everything funnels into `tracing`;
//! a disabled category emits nothing at all. None of these calls can
//! fail or block the invalidation path.

use std::fmt;

const TARGET: &str = "purgeflow::invalidation";

/// Structured log sink with per-category switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugLog {
    cron_lifecycle: bool,
    invalidation_params: bool,
}

impl DebugLog {
    /// Build with explicit category switches.
    pub fn new(cron_lifecycle: bool, invalidation_params: bool) -> Self {
        Self {
            cron_lifecycle,
            invalidation_params,
        }
    }

    /// Whether the flush lifecycle category is on.
    #[must_use]
    pub fn should_log_cron_operations(&self) -> bool {
        self.cron_lifecycle
    }

    /// Whether the parameter category is on.
    #[must_use]
    pub fn should_log_invalidation_params(&self) -> bool {
        self.invalidation_params
    }

    /// A scheduled flush began.
    pub fn cron_started(&self) {
        if self.cron_lifecycle {
            tracing::info!(target: TARGET, "invalidation flush started");
        }
    }

    /// A scheduled flush ended without dispatching.
    pub fn cron_skipped(&self, reason: &str) {
        if self.cron_lifecycle {
            tracing::info!(target: TARGET, reason, "invalidation flush skipped");
        }
    }

    /// A scheduled flush ran to completion.
    pub fn cron_completed(&self) {
        if self.cron_lifecycle {
            tracing::info!(target: TARGET, "invalidation flush completed");
        }
    }

    /// A flush registration was refused.
    pub fn registration_skipped(&self, reason: &str) {
        if self.cron_lifecycle {
            tracing::info!(target: TARGET, reason, "flush registration skipped");
        }
    }

    /// A flush was (re-)armed.
    pub fn registration_completed(&self, pending_paths: usize) {
        if self.cron_lifecycle {
            tracing::info!(target: TARGET, pending_paths, "flush registered");
        }
    }

    /// The dispatch reached the CDN.
    pub fn dispatch_succeeded(&self, receipt: &dyn fmt::Debug) {
        if self.cron_lifecycle {
            tracing::info!(target: TARGET, ?receipt, "invalidation dispatched");
        }
    }

    /// The dispatch failed; the batch is dropped regardless.
    pub fn dispatch_failed(&self, error: &dyn fmt::Display) {
        if self.cron_lifecycle {
            tracing::error!(target: TARGET, %error, "invalidation dispatch failed");
        }
    }

    /// Dump request/batch parameters when the category is on.
    pub fn invalidation_params(&self, label: &str, params: &dyn fmt::Debug) {
        if self.invalidation_params {
            tracing::debug!(target: TARGET, label, ?params, "invalidation parameters");
        }
    }
}
