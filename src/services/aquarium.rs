use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use tokio::sync::Mutex;

use crate::{
    config::Config,
    constants::FISH_LOAD_ERROR,
    integrations::AquariumApi,
    scheduler::TaskHandle,
    simulation::{Arena, MotionParams, MotionSimulator},
    state::ViewStore,
    wallet::WalletProvider,
};

/// Aquarium Service - loads the connected account's fish and animates them
pub struct AquariumService {
    api: Arc<dyn AquariumApi>,
    store: Arc<ViewStore>,
    simulator: Mutex<MotionSimulator<StdRng>>,
    fallback_address: String,
}

impl AquariumService {
    pub fn new(
        api: Arc<dyn AquariumApi>,
        store: Arc<ViewStore>,
        simulator: MotionSimulator<StdRng>,
        fallback_address: String,
    ) -> Self {
        Self {
            api,
            store,
            simulator: Mutex::new(simulator),
            fallback_address,
        }
    }

    pub fn from_config(api: Arc<dyn AquariumApi>, store: Arc<ViewStore>, config: &Config) -> Self {
        let arena = Arena::new(config.arena_width, config.arena_height);
        let params = MotionParams::default().with_perturb_probability(config.perturb_probability);
        Self::new(
            api,
            store,
            MotionSimulator::from_os_rng(arena, params),
            config.fallback_user_address.clone(),
        )
    }

    /// Replace the tank with the fish owned by `account`.
    ///
    /// `None` empties the tank. A blank address falls back to the mock user.
    /// On failure the tank is emptied and a user-facing error is stored.
    pub async fn load_for_account(&self, account: Option<&str>) {
        let Some(account) = account else {
            self.store.aquarium.write().await.clear();
            return;
        };

        let address = if account.trim().is_empty() {
            self.fallback_address.as_str()
        } else {
            account
        };

        let generation = self.store.aquarium.write().await.begin_load(account);
        let outcome = match self.api.fetch_fishes(address).await {
            Ok(records) => {
                let fishes = self.simulator.lock().await.initialize(records);
                tracing::info!("Loaded {} fish for {}", fishes.len(), address);
                Ok(fishes)
            }
            Err(e) => {
                tracing::error!("Failed to fetch user fishes: {}", e);
                Err(FISH_LOAD_ERROR.to_string())
            }
        };

        if !self
            .store
            .aquarium
            .write()
            .await
            .finish_load(generation, outcome)
        {
            tracing::debug!("Discarded superseded fish load for {}", address);
        }
    }

    pub async fn refresh_from_wallet(&self, wallet: &dyn WalletProvider) {
        self.load_for_account(wallet.current_account().as_deref()).await;
    }

    /// One animation frame over whatever set is current.
    pub async fn advance_frame(&self) {
        let mut simulator = self.simulator.lock().await;
        let mut view = self.store.aquarium.write().await;
        if view.fishes.is_empty() {
            return;
        }
        view.fishes = simulator.tick(&view.fishes);

        let arena = simulator.arena();
        let strays = view
            .fishes
            .iter()
            .filter(|fish| !arena.contains(fish.x, fish.y))
            .count();
        if strays > 0 {
            tracing::trace!("{} fish past the edge this frame", strays);
        }
    }

    pub fn start_animation(self: Arc<Self>, frame_interval: Duration) -> TaskHandle {
        TaskHandle::spawn_interval("animation", frame_interval, move || {
            let service = self.clone();
            async move { service.advance_frame().await }
        })
    }

    /// Reload whenever the wallet's account differs from the one on screen.
    pub fn start_wallet_watch(
        self: Arc<Self>,
        wallet: Arc<dyn WalletProvider>,
        period: Duration,
    ) -> TaskHandle {
        TaskHandle::spawn_interval("wallet-watch", period, move || {
            let service = self.clone();
            let wallet = wallet.clone();
            async move {
                let current = wallet.current_account();
                let shown = service.store.aquarium.read().await.account.clone();
                if current != shown {
                    tracing::info!("Account changed: {:?} -> {:?}", shown, current);
                    service.load_for_account(current.as_deref()).await;
                }
            }
        })
    }
}
