use crate::config::POLL_SCHEDULE;
use crate::relay::Relay;
use crate::watermark::SledStore;
use anyhow::Result;
use log::{error, warn};
use opensea::HttpClient;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

pub(crate) struct Scheduler {
    relay: Arc<Relay<HttpClient, SledStore, twitter::Client>>,
    scheduler: JobScheduler,
}

impl Scheduler {
    pub(crate) async fn new(relay: Relay<HttpClient, SledStore, twitter::Client>) -> Result<Self> {
        let scheduler = JobScheduler::new().await?;
        Ok(Scheduler {
            relay: Arc::new(relay),
            scheduler,
        })
    }

    pub(crate) async fn start(self) -> Result<()> {
        let relay = self.relay.clone();

        self.scheduler
            .add(Job::new_async(POLL_SCHEDULE, move |_uuid, _l| {
                let relay = relay.clone();
                Box::pin(async move {
                    // Skip the tick if the previous one is still going.
                    let Ok(_guard) = relay.tick_lock().try_lock() else {
                        warn!("previous poll still running, skipping this tick");
                        return;
                    };

                    if let Err(e) = relay.poll().await {
                        error!("poll cycle failed: {e:#}");
                    }
                })
            })?)
            .await?;

        Ok(self.scheduler.start().await?)
    }
}
