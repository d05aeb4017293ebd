//! Debounced CDN cache invalidation for purgeflow.
//!
//! Change events from the host are coalesced into a single persisted
//! batch; a one-shot deferred flush, re-armed on every event, drains the
//! batch through the CDN dispatcher a minute after the last quiet moment
//! the scheduler saw. A kill switch lets operators park the pipeline
//! without losing the accumulated batch, and dispatch is deliberately
//! at-most-once: a failed call is logged and spent, not retried.
//!
//! Host integration happens entirely through the traits in [`traits`]:
//! durable batch storage, the deferred-job primitive, the kill switch,
//! and the CDN client are all constructor-injected.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod batch;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod log;
pub mod scheduler;
pub mod store;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use batch::{
    InvalidationBatch, InvalidationQuery, InvalidationReceipt, InvalidationRequest, PathSet,
    WILDCARD_PATH,
};
pub use config::InvalidationConfig;
pub use dispatch::CdnDispatcher;
pub use error::{CdnError, ConfigError, DispatchError, ScheduleError, StoreError};
pub use log::DebugLog;
pub use scheduler::{FLUSH_DELAY, FLUSH_HOOK, InvalidationScheduler};
pub use store::MemoryBatchStore;
pub use traits::{BatchStore, CdnClient, DisableSwitch, JobScheduler, ToggleSwitch};
