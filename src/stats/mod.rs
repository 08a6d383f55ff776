use chrono::{DateTime, Utc};
use log::info;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct WatchStats {
    pub start_time: DateTime<Utc>,
    pub last_tick: Option<DateTime<Utc>>,
    pub ticks: usize,
    pub skipped_ticks: usize,
    pub fetch_failures: usize,
    pub listings_fetched: usize,
    pub products_notified: usize,
    pub messages_sent: usize,
    pub delivery_failures: usize,
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<WatchStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(WatchStats {
                start_time: Utc::now(),
                last_tick: None,
                ticks: 0,
                skipped_ticks: 0,
                fetch_failures: 0,
                listings_fetched: 0,
                products_notified: 0,
                messages_sent: 0,
                delivery_failures: 0,
            })),
        }
    }

    pub fn record_tick(&self) {
        let mut stats = self.stats.write();
        stats.ticks += 1;
        stats.last_tick = Some(Utc::now());
    }

    pub fn record_skipped_tick(&self) {
        self.stats.write().skipped_ticks += 1;
    }

    pub fn record_fetch(&self, listings: usize) {
        self.stats.write().listings_fetched += listings;
    }

    pub fn record_fetch_failure(&self) {
        self.stats.write().fetch_failures += 1;
    }

    pub fn record_notified(&self, products: usize) {
        self.stats.write().products_notified += products;
    }

    pub fn record_message_sent(&self) {
        self.stats.write().messages_sent += 1;
    }

    pub fn record_delivery_failure(&self) {
        self.stats.write().delivery_failures += 1;
    }

    pub fn get_stats(&self) -> WatchStats {
        self.stats.read().clone()
    }

    /// Snapshot of the counters as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.get_stats())
    }

    pub fn log_summary(&self) {
        let stats = self.stats.read();
        let uptime = Utc::now().signed_duration_since(stats.start_time);

        info!(
            "Uptime {}m | ticks={} skipped={} fetch_failures={} listings={} notified={} messages={} delivery_failures={}",
            uptime.num_minutes(),
            stats.ticks,
            stats.skipped_ticks,
            stats.fetch_failures,
            stats.listings_fetched,
            stats.products_notified,
            stats.messages_sent,
            stats.delivery_failures
        );
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_shared_between_clones() {
        let tracker = StatsTracker::new();
        let handle = tracker.clone();

        handle.record_tick();
        handle.record_fetch(3);
        handle.record_notified(2);
        handle.record_message_sent();
        tracker.record_tick();
        tracker.record_skipped_tick();
        tracker.record_fetch_failure();
        tracker.record_delivery_failure();

        let stats = tracker.get_stats();
        assert_eq!(stats.ticks, 2);
        assert_eq!(stats.skipped_ticks, 1);
        assert_eq!(stats.fetch_failures, 1);
        assert_eq!(stats.listings_fetched, 3);
        assert_eq!(stats.products_notified, 2);
        assert_eq!(stats.messages_sent, 1);
        assert_eq!(stats.delivery_failures, 1);
        assert!(stats.last_tick.is_some());
    }

    #[test]
    fn test_json_snapshot() {
        let tracker = StatsTracker::new();
        tracker.record_tick();
        tracker.record_notified(4);

        let value: serde_json::Value = serde_json::from_str(&tracker.to_json().unwrap()).unwrap();
        assert_eq!(value["ticks"], 1);
        assert_eq!(value["products_notified"], 4);
        assert!(value["start_time"].is_string());
        assert!(value["last_tick"].is_string());
    }
}
