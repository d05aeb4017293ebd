//! Wire the scheduler to stand-in host collaborators and run one full
//! debounce-and-flush cycle.
//!
//! Run with: `cargo run --example scheduled_flush`

use async_trait::async_trait;
use parking_lot::Mutex;
use purgeflow_credential::{ContainerCredentialProvider, Credentials, ProviderConfig, StaticEnvironment};
use purgeflow_invalidation::{
    CdnClient, CdnDispatcher, CdnError, DebugLog, InvalidationConfig, InvalidationQuery,
    InvalidationReceipt, InvalidationRequest, InvalidationScheduler, JobScheduler,
    MemoryBatchStore, ScheduleError, ToggleSwitch,
};
use std::sync::Arc;
use std::time::Duration;

/// Prints what a real host scheduler would persist.
struct PrintingScheduler;

#[async_trait]
impl JobScheduler for PrintingScheduler {
    async fn schedule_once(&self, hook: &str, delay: Duration) -> Result<(), ScheduleError> {
        println!("host: armed one-shot `{hook}` in {delay:?}");
        Ok(())
    }

    async fn cancel(&self, hook: &str) -> Result<(), ScheduleError> {
        println!("host: cancelled pending `{hook}`");
        Ok(())
    }
}

/// Prints the request a real CDN client would sign and send.
struct PrintingCdn {
    requests: Mutex<u32>,
}

#[async_trait]
impl CdnClient for PrintingCdn {
    async fn create_invalidation(
        &self,
        request: &InvalidationRequest,
        _credentials: Option<&Credentials>,
    ) -> Result<InvalidationReceipt, CdnError> {
        *self.requests.lock() += 1;
        println!(
            "cdn: invalidating {} path(s) on {}",
            request.batch.paths.len(),
            request.distribution_id
        );
        Ok(InvalidationReceipt {
            id: Some("I2J0SM14XHKKPX".into()),
            status: Some("InProgress".into()),
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let provider = Arc::new(
        ContainerCredentialProvider::new(
            Arc::new(StaticEnvironment::new()),
            ProviderConfig::default(),
        )
        .expect("valid config"),
    );

    let scheduler = InvalidationScheduler::new(
        InvalidationConfig::for_distribution("EDJDM2GOELDFK"),
        Arc::new(MemoryBatchStore::new()),
        Arc::new(PrintingScheduler),
        Arc::new(ToggleSwitch::new()),
        CdnDispatcher::new(
            provider,
            Arc::new(PrintingCdn {
                requests: Mutex::new(0),
            }),
        ),
        DebugLog::new(true, true),
    )
    .expect("valid config");

    // Two change events inside the debounce window.
    for paths in [vec!["/posts/42", "/feed"], vec!["/posts/42", "/sitemap.xml"]] {
        let query = InvalidationQuery {
            paths: paths.into_iter().collect(),
        };
        let armed = scheduler.register_cron_event(&query).await;
        println!("registered: {armed}");
    }

    // The host timer fires a minute later.
    let dispatched = scheduler.run_scheduled_flush().await;
    println!("flush dispatched: {dispatched}");
}
