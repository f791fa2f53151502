use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::{
    chain::ChainConfig,
    error::{AppError, Result},
    integrations::AquariumApi,
    notifier::Notifier,
    services::{ActionOutcome, AquariumService, BusyGuard, StatsPoller, SubmitMode},
    wallet::WalletProvider,
};

const SPAWNED_FISH_NAME: &str = "NewSpawnedFish";

/// Actions Panel - spawn and clean flows for the connected player
pub struct ActionsService {
    api: Arc<dyn AquariumApi>,
    wallet: Arc<dyn WalletProvider>,
    notifier: Arc<dyn Notifier>,
    chain: ChainConfig,
    mode: SubmitMode,
    cleaning_power: u32,
    aquarium: Arc<AquariumService>,
    stats: Arc<StatsPoller>,
    spawning: AtomicBool,
    cleaning: AtomicBool,
}

impl ActionsService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        api: Arc<dyn AquariumApi>,
        wallet: Arc<dyn WalletProvider>,
        notifier: Arc<dyn Notifier>,
        chain: ChainConfig,
        mode: SubmitMode,
        cleaning_power: u32,
        aquarium: Arc<AquariumService>,
        stats: Arc<StatsPoller>,
    ) -> Self {
        Self {
            api,
            wallet,
            notifier,
            chain,
            mode,
            cleaning_power,
            aquarium,
            stats,
            spawning: AtomicBool::new(false),
            cleaning: AtomicBool::new(false),
        }
    }

    pub fn is_spawning(&self) -> bool {
        BusyGuard::is_set(&self.spawning)
    }

    pub fn is_cleaning(&self) -> bool {
        BusyGuard::is_set(&self.cleaning)
    }

    fn require_account(&self) -> Result<String> {
        self.wallet.current_account().ok_or_else(|| {
            let err = AppError::WalletNotConnected;
            self.notifier.alert(&err.to_string());
            err
        })
    }

    /// Simulate engagement, then spawn a fish for the connected account.
    pub async fn spawn_fish(&self) -> Result<ActionOutcome> {
        let address = self.require_account()?;
        let _busy = BusyGuard::acquire(&self.spawning, "Spawn")?;
        tracing::info!("Attempting to spawn fish for {}", address);

        match self.run_spawn(&address).await {
            Ok(outcome) => {
                self.aquarium.load_for_account(Some(&address)).await;
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!("Spawn process failed: {}", e);
                self.notifier.alert(&format!("Spawn process failed: {}", e));
                Err(e)
            }
        }
    }

    async fn run_spawn(&self, address: &str) -> Result<ActionOutcome> {
        let hype = self.api.simulate_hype().await?;
        tracing::debug!("Simulated hype: {:?}", hype.hype_increase);
        self.notifier.alert("Hype simulated! Now building transaction...");

        match self.mode {
            SubmitMode::Wallet => {
                let call = self.chain.mint(address, SPAWNED_FISH_NAME);
                let digest = self.wallet.sign_and_execute(&call).await?;
                self.notifier.alert("Fish Spawned Successfully!");
                Ok(ActionOutcome::Submitted { digest })
            }
            SubmitMode::Simulated => {
                let spawned = self.api.simulate_spawn(address).await?;
                self.notifier
                    .alert(&format!("Mock Spawn Successful: {}", spawned.message));
                Ok(ActionOutcome::Simulated {
                    message: spawned.message,
                })
            }
        }
    }

    /// Reduce pollution by the configured cleaning power.
    pub async fn clean_ocean(&self) -> Result<ActionOutcome> {
        self.require_account()?;
        let _busy = BusyGuard::acquire(&self.cleaning, "Clean")?;
        tracing::info!("Attempting to clean ocean (power {})", self.cleaning_power);
        self.notifier.alert("Building clean ocean transaction...");

        match self.run_clean().await {
            Ok(outcome) => {
                self.stats.refresh().await;
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!("Clean process failed: {}", e);
                self.notifier.alert(&format!("Clean process failed: {}", e));
                Err(e)
            }
        }
    }

    async fn run_clean(&self) -> Result<ActionOutcome> {
        match self.mode {
            SubmitMode::Wallet => {
                let call = self.chain.clean_ocean(self.cleaning_power);
                let digest = self.wallet.sign_and_execute(&call).await?;
                self.notifier.alert("Ocean Cleaned Successfully!");
                Ok(ActionOutcome::Submitted { digest })
            }
            SubmitMode::Simulated => {
                let cleaned = self.api.simulate_clean(self.cleaning_power).await?;
                if let Some(level) = cleaned.new_pollution_level {
                    tracing::info!("Pollution now at {}%", level);
                }
                self.notifier
                    .alert(&format!("Mock Clean Successful: {}", cleaned.message));
                Ok(ActionOutcome::Simulated {
                    message: cleaned.message,
                })
            }
        }
    }
}
