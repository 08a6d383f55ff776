use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use super::message::{build_blocks, chunk_blocks, MESSAGE_CHUNK_LIMIT};
use super::sink::{ChannelInfo, ChatSink};
use crate::catalog::{CatalogFetcher, ProductListing};
use crate::core::ScheduledTask;
use crate::dedup::SeenStore;
use crate::StatsTracker;

/// What a single check ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    ChannelMissing,
    FetchFailed,
    NothingNew,
    Notified { listings: usize, messages: usize },
    DeliveryFailed { listings: usize, sent: usize },
}

#[derive(Debug, Clone)]
pub struct DeliverySettings {
    pub chunk_limit: usize,
    pub send_pause: Duration,
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            chunk_limit: MESSAGE_CHUNK_LIMIT,
            send_pause: Duration::from_secs(1),
        }
    }
}

/// Keeps the listings that are neither already seen nor out of stock, and
/// records them as seen. Only the first of several listings sharing an
/// identity is kept.
pub fn select_new(listings: Vec<ProductListing>, seen: &mut dyn SeenStore) -> Vec<ProductListing> {
    listings
        .into_iter()
        .filter(|listing| !listing.is_out_of_stock())
        .filter(|listing| seen.insert(listing.identity()))
        .collect()
}

/// Fetches the catalogue, diffs it against what was already announced and
/// posts anything new to the configured channel.
pub struct ChangeNotifier {
    fetcher: CatalogFetcher,
    sink: Box<dyn ChatSink>,
    seen: Box<dyn SeenStore>,
    channel_id: u64,
    settings: DeliverySettings,
    stats: Arc<StatsTracker>,
}

impl ChangeNotifier {
    pub fn new(
        fetcher: CatalogFetcher,
        sink: Box<dyn ChatSink>,
        seen: Box<dyn SeenStore>,
        channel_id: u64,
    ) -> Self {
        Self {
            fetcher,
            sink,
            seen,
            channel_id,
            settings: DeliverySettings::default(),
            stats: Arc::new(StatsTracker::new()),
        }
    }

    pub fn with_settings(mut self, settings: DeliverySettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_stats(mut self, stats: Arc<StatsTracker>) -> Self {
        self.stats = stats;
        self
    }

    pub fn seen(&self) -> &dyn SeenStore {
        self.seen.as_ref()
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    pub fn diff(&mut self, listings: Vec<ProductListing>) -> Vec<ProductListing> {
        select_new(listings, self.seen.as_mut())
    }

    pub async fn tick(&mut self) -> TickOutcome {
        self.stats.record_tick();

        let channel = match self.sink.resolve_channel(self.channel_id).await {
            Ok(Some(channel)) => channel,
            Ok(None) => {
                error!("Channel {} not found, skipping check", self.channel_id);
                self.stats.record_skipped_tick();
                return TickOutcome::ChannelMissing;
            }
            Err(e) => {
                error!(
                    "Could not resolve channel {}: {}, skipping check",
                    self.channel_id, e
                );
                self.stats.record_skipped_tick();
                return TickOutcome::ChannelMissing;
            }
        };

        info!("Checking {} for new products...", self.fetcher.search_url());
        let listings = match self.fetcher.fetch().await {
            Ok(listings) => listings,
            Err(e) => {
                warn!("Fetch failed, treating as no products this tick: {}", e);
                self.stats.record_fetch_failure();
                return TickOutcome::FetchFailed;
            }
        };
        self.stats.record_fetch(listings.len());

        let batch = self.diff(listings);
        if batch.is_empty() {
            info!("No new products found.");
            return TickOutcome::NothingNew;
        }

        info!(
            "Found {} new products, {} identities seen so far",
            batch.len(),
            self.seen.len()
        );
        match serde_json::to_string(&batch) {
            Ok(json) => debug!("New listings: {}", json),
            Err(e) => warn!("Could not serialize new listings: {}", e),
        }
        self.stats.record_notified(batch.len());
        self.deliver(&channel, &batch).await
    }

    async fn deliver(&self, channel: &ChannelInfo, batch: &[ProductListing]) -> TickOutcome {
        let chunks = chunk_blocks(&build_blocks(batch), self.settings.chunk_limit);

        for (index, chunk) in chunks.iter().enumerate() {
            if index > 0 {
                sleep(self.settings.send_pause).await;
            }

            if let Err(e) = self.sink.send(channel, chunk).await {
                error!(
                    "Failed to deliver message {}/{} to channel {}: {}",
                    index + 1,
                    chunks.len(),
                    channel.id,
                    e
                );
                self.stats.record_delivery_failure();
                return TickOutcome::DeliveryFailed {
                    listings: batch.len(),
                    sent: index,
                };
            }
            self.stats.record_message_sent();
        }

        TickOutcome::Notified {
            listings: batch.len(),
            messages: chunks.len(),
        }
    }
}

#[async_trait]
impl ScheduledTask for ChangeNotifier {
    fn name(&self) -> String {
        format!("stock check for channel {}", self.channel_id)
    }

    async fn run_once(&mut self) {
        let outcome = self.tick().await;
        info!("Check finished: {:?}", outcome);
        self.stats.log_summary();
    }
}
