//! Full pipeline through the public API: change events in, one batched
//! CDN dispatch out.

use async_trait::async_trait;
use parking_lot::Mutex;
use purgeflow_credential::{
    ContainerCredentialProvider, Credentials, ProviderConfig, StaticEnvironment,
};
use purgeflow_invalidation::{
    CdnClient, CdnDispatcher, CdnError, DebugLog, FLUSH_HOOK, InvalidationConfig,
    InvalidationQuery, InvalidationReceipt, InvalidationRequest, InvalidationScheduler,
    JobScheduler, MemoryBatchStore, ScheduleError, ToggleSwitch,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Host scheduler stand-in: remembers the pending one-shot per hook.
#[derive(Default)]
struct HostScheduler {
    pending: Mutex<HashMap<String, Duration>>,
}

#[async_trait]
impl JobScheduler for HostScheduler {
    async fn schedule_once(&self, hook: &str, delay: Duration) -> Result<(), ScheduleError> {
        self.pending.lock().insert(hook.to_owned(), delay);
        Ok(())
    }

    async fn cancel(&self, hook: &str) -> Result<(), ScheduleError> {
        self.pending.lock().remove(hook);
        Ok(())
    }
}

/// CDN stand-in recording every dispatched request.
#[derive(Default)]
struct Cdn {
    requests: Mutex<Vec<InvalidationRequest>>,
}

#[async_trait]
impl CdnClient for Cdn {
    async fn create_invalidation(
        &self,
        request: &InvalidationRequest,
        _credentials: Option<&Credentials>,
    ) -> Result<InvalidationReceipt, CdnError> {
        self.requests.lock().push(request.clone());
        Ok(InvalidationReceipt::default())
    }
}

struct Host {
    scheduler: InvalidationScheduler,
    jobs: Arc<HostScheduler>,
    cdn: Arc<Cdn>,
}

fn host() -> Host {
    let provider = Arc::new(
        ContainerCredentialProvider::new(
            Arc::new(StaticEnvironment::new()),
            ProviderConfig::default(),
        )
        .expect("valid config"),
    );
    let jobs = Arc::new(HostScheduler::default());
    let cdn = Arc::new(Cdn::default());

    let scheduler = InvalidationScheduler::new(
        InvalidationConfig::for_distribution("EDJDM2GOELDFK"),
        Arc::new(MemoryBatchStore::new()),
        jobs.clone(),
        Arc::new(ToggleSwitch::new()),
        CdnDispatcher::new(provider, cdn.clone()),
        DebugLog::new(true, true),
    )
    .expect("valid config");

    Host {
        scheduler,
        jobs,
        cdn,
    }
}

fn query(paths: &[&str]) -> InvalidationQuery {
    InvalidationQuery {
        paths: paths.iter().copied().collect(),
    }
}

#[tokio::test]
async fn events_within_the_window_flush_as_one_batch() {
    let host = host();

    // Two change events land inside the debounce window.
    assert!(host.scheduler.register_cron_event(&query(&["/a"])).await);
    assert!(host.scheduler.register_cron_event(&query(&["/b", "/a"])).await);

    // One pending one-shot flush, armed a minute out.
    assert_eq!(
        host.jobs.pending.lock().get(FLUSH_HOOK),
        Some(&Duration::from_secs(60))
    );
    assert_eq!(host.jobs.pending.lock().len(), 1);

    // The host timer fires.
    host.jobs.cancel(FLUSH_HOOK).await.unwrap();
    assert!(host.scheduler.run_scheduled_flush().await);

    // Exactly one request, both paths, each exactly once.
    let requests = host.cdn.requests.lock();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].distribution_id, "EDJDM2GOELDFK");
    assert_eq!(requests[0].batch.paths.items(), &["/a", "/b"]);

    drop(requests);

    // A second firing has nothing left to do.
    assert!(!host.scheduler.run_scheduled_flush().await);
    assert_eq!(host.cdn.requests.lock().len(), 1);
}

#[tokio::test]
async fn status_transitions_drive_the_event_source() {
    let host = host();

    // The host event source consults should_invalidate before enqueueing.
    assert!(host.scheduler.should_invalidate("publish", "draft"));
    assert!(host.scheduler.should_invalidate("trash", "publish"));
    assert!(!host.scheduler.should_invalidate("draft", "pending"));
    assert!(!host.scheduler.should_invalidate("publish", "publish"));
}
