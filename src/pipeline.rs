use crate::digest;
use crate::gate::{self, ScheduleConfig};
use crate::mailer::Mailer;
use crate::sources::IpoSource;
use crate::state::SendStateStore;
use crate::types::{Listing, Result};
use chrono::Utc;
use futures::future::join_all;
use reqwest::Client;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
    /// The gate denied this run; nothing was fetched or sent.
    Skipped,
    /// The digest went out; `aggregated` counts listings before the
    /// day filter.
    Sent { aggregated: usize },
}

/// Sequences one run: gate check, concurrent source fetch, filter and
/// render, send, record. The only component that orders side effects.
pub struct DigestPipeline {
    client: Client,
    sources: Vec<Box<dyn IpoSource>>,
    store: SendStateStore,
    mailer: Mailer,
    schedule: ScheduleConfig,
}

impl DigestPipeline {
    /// `sources` must be in digest priority order; listings are
    /// concatenated as declared, never re-sorted.
    pub fn new(
        client: Client,
        sources: Vec<Box<dyn IpoSource>>,
        store: SendStateStore,
        mailer: Mailer,
        schedule: ScheduleConfig,
    ) -> Self {
        Self {
            client,
            sources,
            store,
            mailer,
            schedule,
        }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let now = Utc::now();

        let last_sent = self.store.last_sent().await;
        if !gate::is_sendable(now, last_sent, &self.schedule) {
            info!("outside the send window, skipping this run");
            return Ok(RunOutcome::Skipped);
        }

        let mode = gate::digest_mode(now, &self.schedule);

        // Fan out to every source, join before aggregating. A failed
        // source already degraded to an empty batch inside fetch().
        let fetches = self.sources.iter().map(|s| s.fetch(&self.client, now));
        let listings: Vec<Listing> = join_all(fetches).await.into_iter().flatten().collect();
        info!(
            "aggregated {} listings from {} sources",
            listings.len(),
            self.sources.len()
        );

        let body = digest::render(&listings, mode);
        self.mailer.send(mode.subject(), &body).await?;

        // Reached only after the transport accepted the message.
        self.store.record_sent(Utc::now()).await;

        Ok(RunOutcome::Sent {
            aggregated: listings.len(),
        })
    }
}
