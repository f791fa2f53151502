use std::sync::Arc;
use std::time::Duration;

use crate::{
    constants::LEADERBOARD_LOAD_ERROR, integrations::AquariumApi, scheduler::TaskHandle,
    state::ViewStore,
};

/// Leaderboard Poller - refreshes the ranked scores on its own timer
pub struct LeaderboardPoller {
    api: Arc<dyn AquariumApi>,
    store: Arc<ViewStore>,
}

impl LeaderboardPoller {
    pub fn new(api: Arc<dyn AquariumApi>, store: Arc<ViewStore>) -> Self {
        Self { api, store }
    }

    pub async fn refresh(&self) {
        self.store.leaderboard.write().await.begin();

        match self.api.fetch_leaderboard().await {
            Ok(entries) => {
                tracing::debug!("Leaderboard refreshed: {} entries", entries.len());
                self.store.leaderboard.write().await.succeed(entries);
            }
            Err(e) => {
                tracing::error!("Failed to fetch leaderboard: {}", e);
                self.store
                    .leaderboard
                    .write()
                    .await
                    .fail(Vec::new(), LEADERBOARD_LOAD_ERROR);
            }
        }
    }

    pub fn start(self: Arc<Self>, period: Duration) -> TaskHandle {
        TaskHandle::spawn_interval("leaderboard-poller", period, move || {
            let poller = self.clone();
            async move { poller.refresh().await }
        })
    }
}
