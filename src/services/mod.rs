// All service modules
pub mod actions;
pub mod aquarium;
pub mod leaderboard;
pub mod sponsor;
pub mod stats;

#[cfg(test)]
mod test_support;

// Re-export for convenience
pub use actions::ActionsService;
pub use aquarium::AquariumService;
pub use leaderboard::LeaderboardPoller;
pub use sponsor::{SponsorMintForm, SponsorService};
pub use stats::StatsPoller;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::{
    chain::ChainConfig,
    config::Config,
    constants::WALLET_WATCH_INTERVAL_MS,
    error::{AppError, Result},
    integrations::AquariumApi,
    notifier::Notifier,
    scheduler::TaskHandle,
    state::ViewStore,
    wallet::{TransactionDigest, WalletProvider},
};

/// Where write actions go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// Mock API endpoints and simulated delays.
    Simulated,
    /// Move calls signed and executed by the wallet.
    Wallet,
}

impl SubmitMode {
    pub fn from_config(config: &Config) -> Self {
        if config.submit_onchain {
            SubmitMode::Wallet
        } else {
            SubmitMode::Simulated
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Simulated { message: String },
    Submitted { digest: TransactionDigest },
}

/// Holds a busy flag for the lifetime of one action.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool, action: &'static str) -> Result<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            tracing::warn!("{} requested while already running", action);
            return Err(AppError::Busy(action));
        }
        Ok(Self { flag })
    }

    pub(crate) fn is_set(flag: &AtomicBool) -> bool {
        flag.load(Ordering::Acquire)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Everything the front end talks to, wired from one config.
pub struct AppServices {
    pub store: Arc<ViewStore>,
    pub aquarium: Arc<AquariumService>,
    pub stats: Arc<StatsPoller>,
    pub leaderboard: Arc<LeaderboardPoller>,
    pub actions: Arc<ActionsService>,
    pub sponsor: Arc<SponsorService>,
    pub wallet: Arc<dyn WalletProvider>,
}

impl AppServices {
    pub fn build(
        config: &Config,
        api: Arc<dyn AquariumApi>,
        wallet: Arc<dyn WalletProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let store = Arc::new(ViewStore::new());
        let chain = ChainConfig::from_config(config);
        let mode = SubmitMode::from_config(config);
        tracing::info!("Write actions run in {:?} mode", mode);

        let aquarium = Arc::new(AquariumService::from_config(
            api.clone(),
            store.clone(),
            config,
        ));
        let stats = Arc::new(StatsPoller::new(api.clone(), store.clone()));
        let leaderboard = Arc::new(LeaderboardPoller::new(api.clone(), store.clone()));
        let actions = Arc::new(ActionsService::new(
            api,
            wallet.clone(),
            notifier.clone(),
            chain.clone(),
            mode,
            config.cleaning_power,
            aquarium.clone(),
            stats.clone(),
        ));
        let sponsor = Arc::new(SponsorService::new(
            wallet.clone(),
            notifier,
            chain,
            mode,
            config.sponsor_address.clone(),
            Duration::from_millis(config.register_delay_ms),
            Duration::from_millis(config.mint_delay_ms),
        ));

        Self {
            store,
            aquarium,
            stats,
            leaderboard,
            actions,
            sponsor,
            wallet,
        }
    }
}

/// Log every fish on screen; stands in for the rendered tank.
pub async fn log_tank(store: &ViewStore) {
    let view = store.aquarium_snapshot().await;
    match (&view.account, &view.error) {
        (None, _) => tracing::debug!("Tank: no wallet connected"),
        (Some(_), Some(error)) => tracing::debug!("Tank: {}", error),
        (Some(account), None) => {
            tracing::debug!("Tank for {}: {} fish", account, view.fishes.len());
            for fish in &view.fishes {
                tracing::debug!("  {}", fish.describe());
            }
        }
    }
}

/// Start all background services
pub fn start_background_services(services: &AppServices, config: &Config) -> Vec<TaskHandle> {
    tracing::info!("Starting background services...");

    let mut tasks = vec![
        services.aquarium.clone().start_animation(config.frame_interval()),
        services
            .aquarium
            .clone()
            .start_wallet_watch(
                services.wallet.clone(),
                Duration::from_millis(WALLET_WATCH_INTERVAL_MS),
            ),
        services.stats.clone().start(config.stats_poll_interval()),
        services
            .leaderboard
            .clone()
            .start(config.leaderboard_poll_interval()),
    ];

    let store = services.store.clone();
    tasks.push(TaskHandle::spawn_interval(
        "snapshot",
        config.snapshot_interval(),
        move || {
            let store = store.clone();
            async move { log_tank(&store).await }
        },
    ));

    tracing::info!("All background services started successfully");
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::RecordingNotifier;
    use crate::scheduler::stop_all;
    use crate::wallet::DevWallet;
    use super::test_support::{record, FakeApi};

    const USER: &str = "0xUSER1_MOCK_ADDRESS";

    #[test]
    fn busy_guard_rejects_reentry_and_resets_on_drop() {
        let flag = AtomicBool::new(false);
        {
            let _first = BusyGuard::acquire(&flag, "Spawn").expect("free");
            assert!(BusyGuard::is_set(&flag));
            let err = BusyGuard::acquire(&flag, "Spawn").err().expect("busy");
            assert_eq!(err.to_string(), "Spawn already in progress");
        }
        assert!(!BusyGuard::is_set(&flag));
        assert!(BusyGuard::acquire(&flag, "Spawn").is_ok());
    }

    #[test]
    fn submit_mode_follows_config_flag() {
        let mut config = Config::default();
        assert_eq!(SubmitMode::from_config(&config), SubmitMode::Simulated);
        config.submit_onchain = true;
        assert_eq!(SubmitMode::from_config(&config), SubmitMode::Wallet);
    }

    #[tokio::test]
    async fn background_services_populate_views_and_stop() {
        let mut config = Config::default();
        config.frame_interval_ms = 5;
        let api = Arc::new(FakeApi::with_fishes(USER, vec![record("1", "Nemo", USER)]));
        let wallet = Arc::new(DevWallet::new(Some(USER.to_string())));
        let services = AppServices::build(
            &config,
            api,
            wallet,
            Arc::new(RecordingNotifier::new()),
        );

        let tasks = start_background_services(&services, &config);
        assert_eq!(tasks.len(), 5);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(services.store.aquarium_snapshot().await.fishes.len(), 1);
        assert!(services.store.stats_snapshot().await.data.is_some());
        assert_eq!(
            services.store.leaderboard_snapshot().await.data.len(),
            2
        );
        log_tank(&services.store).await;

        stop_all(tasks).await;
    }
}
