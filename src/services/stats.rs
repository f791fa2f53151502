use std::sync::Arc;
use std::time::Duration;

use crate::{
    constants::STATS_LOAD_ERROR, integrations::AquariumApi, scheduler::TaskHandle,
    state::ViewStore,
};

/// Stats Poller - keeps the ecosystem counters fresh
pub struct StatsPoller {
    api: Arc<dyn AquariumApi>,
    store: Arc<ViewStore>,
}

impl StatsPoller {
    pub fn new(api: Arc<dyn AquariumApi>, store: Arc<ViewStore>) -> Self {
        Self { api, store }
    }

    /// Fetch once; on failure the panel falls back to no stats.
    pub async fn refresh(&self) {
        self.store.stats.write().await.begin();

        match self.api.fetch_stats().await {
            Ok(stats) => {
                tracing::debug!(
                    "Stats: pollution={}% population={} sponsors={}",
                    stats.pollution_level,
                    stats.total_population,
                    stats.active_sponsors
                );
                self.store.stats.write().await.succeed(Some(stats));
            }
            Err(e) => {
                tracing::error!("Failed to fetch ecosystem stats: {}", e);
                self.store.stats.write().await.fail(None, STATS_LOAD_ERROR);
            }
        }
    }

    pub fn start(self: Arc<Self>, period: Duration) -> TaskHandle {
        TaskHandle::spawn_interval("stats-poller", period, move || {
            let poller = self.clone();
            async move { poller.refresh().await }
        })
    }
}
