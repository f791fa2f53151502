use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    chain::{ChainConfig, MoveCall},
    error::{AppError, Result},
    notifier::Notifier,
    services::{ActionOutcome, BusyGuard, SubmitMode},
    wallet::WalletProvider,
};

/// Input of the sponsor mint form, kept as typed text.
#[derive(Debug, Clone, PartialEq)]
pub struct SponsorMintForm {
    pub recipient: String,
    pub fish_name: String,
    pub initial_hype: String,
}

impl Default for SponsorMintForm {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            fish_name: String::new(),
            initial_hype: "0".to_string(),
        }
    }
}

impl SponsorMintForm {
    /// Leading digits of the hype field; anything unparsable counts as 0.
    pub fn parsed_hype(&self) -> u64 {
        let digits: String = self
            .initial_hype
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().unwrap_or(0)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Sponsor Zone - registration and special minting
pub struct SponsorService {
    wallet: Arc<dyn WalletProvider>,
    notifier: Arc<dyn Notifier>,
    chain: ChainConfig,
    mode: SubmitMode,
    sponsor_address: String,
    register_delay: Duration,
    mint_delay: Duration,
    registering: AtomicBool,
    minting: AtomicBool,
}

impl SponsorService {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        notifier: Arc<dyn Notifier>,
        chain: ChainConfig,
        mode: SubmitMode,
        sponsor_address: String,
        register_delay: Duration,
        mint_delay: Duration,
    ) -> Self {
        Self {
            wallet,
            notifier,
            chain,
            mode,
            sponsor_address,
            register_delay,
            mint_delay,
            registering: AtomicBool::new(false),
            minting: AtomicBool::new(false),
        }
    }

    // TODO: read sponsor status from the ecosystem state object once the
    // contract exposes a registry view.
    pub fn is_sponsor(&self) -> bool {
        self.wallet
            .current_account()
            .is_some_and(|account| account == self.sponsor_address)
    }

    pub fn is_registering(&self) -> bool {
        BusyGuard::is_set(&self.registering)
    }

    pub fn is_minting(&self) -> bool {
        BusyGuard::is_set(&self.minting)
    }

    fn reject(&self, err: AppError) -> AppError {
        self.notifier.alert(&err.to_string());
        err
    }

    async fn submit(&self, call: &MoveCall, delay: Duration) -> Result<ActionOutcome> {
        match self.mode {
            SubmitMode::Wallet => {
                let digest = self.wallet.sign_and_execute(call).await?;
                Ok(ActionOutcome::Submitted { digest })
            }
            SubmitMode::Simulated => {
                tracing::debug!("Simulating {} with {} args", call.target, call.arguments.len());
                tokio::time::sleep(delay).await;
                Ok(ActionOutcome::Simulated {
                    message: format!("{} simulated", call.function()),
                })
            }
        }
    }

    /// Admin-only on chain; simulated here.
    pub async fn register_sponsor(&self) -> Result<ActionOutcome> {
        let account = self
            .wallet
            .current_account()
            .ok_or_else(|| self.reject(AppError::WalletNotConnected))?;
        let _busy = BusyGuard::acquire(&self.registering, "Sponsor registration")?;
        tracing::info!("Attempting to register {} as sponsor", account);
        self.notifier
            .alert("Building register sponsor transaction... (likely Admin Only)");

        let call = self.chain.register_sponsor(&account);
        match self.submit(&call, self.register_delay).await {
            Ok(outcome) => {
                let message = match &outcome {
                    ActionOutcome::Submitted { .. } => {
                        "Sponsor Registered Successfully! (Requires Admin)".to_string()
                    }
                    ActionOutcome::Simulated { .. } => format!(
                        "Mock registration complete (Admin action simulated). Use {} for testing minting.",
                        self.sponsor_address
                    ),
                };
                self.notifier.alert(&message);
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!("Sponsor registration failed: {}", e);
                self.notifier
                    .alert(&format!("Sponsor Registration Failed: {}", e));
                Err(e)
            }
        }
    }

    /// Mint a special fish for `form.recipient`; clears the form on success.
    pub async fn sponsor_mint(&self, form: &mut SponsorMintForm) -> Result<ActionOutcome> {
        if self.wallet.current_account().is_none() {
            return Err(self.reject(AppError::WalletNotConnected));
        }
        if !self.is_sponsor() {
            return Err(self.reject(AppError::NotSponsor));
        }
        let recipient = form.recipient.trim().to_string();
        let fish_name = form.fish_name.trim().to_string();
        if recipient.is_empty() || fish_name.is_empty() {
            return Err(self.reject(AppError::BadRequest(
                "Please provide recipient address and fish name.".to_string(),
            )));
        }

        let _busy = BusyGuard::acquire(&self.minting, "Sponsor mint")?;
        let hype = form.parsed_hype();
        tracing::info!(
            "Sponsor minting fish: {} for {} with {} hype",
            fish_name,
            recipient,
            hype
        );
        self.notifier.alert("Building sponsor mint transaction...");

        let call = self.chain.sponsor_mint_fish(&recipient, &fish_name, hype);
        match self.submit(&call, self.mint_delay).await {
            Ok(outcome) => {
                self.notifier.alert(&format!(
                    "Sponsor Mint Successful: Fish '{}' minted for {}.",
                    fish_name, recipient
                ));
                form.reset();
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!("Sponsor mint failed: {}", e);
                self.notifier.alert(&format!("Sponsor Mint Failed: {}", e));
                Err(e)
            }
        }
    }
}
