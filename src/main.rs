use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod chain;
mod config;
mod constants;
mod error;
mod integrations;
mod models;
mod notifier;
mod scheduler;
mod services;
mod simulation;
mod state;
mod wallet;

use chain::ChainConfig;
use config::Config;
use integrations::MockApiClient;
use notifier::TracingNotifier;
use services::{AppServices, SponsorMintForm};
use wallet::DevWallet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aquachain=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!("Starting AquaChain client");
    tracing::info!("Mock API: {}", config.api_url);
    if ChainConfig::from_config(&config).has_placeholders() {
        tracing::info!("Contract ids are placeholders; on-chain calls are simulated");
    }

    let api = Arc::new(MockApiClient::from_config(&config)?);
    let wallet = Arc::new(DevWallet::new(config.wallet_address.clone()));
    match &config.wallet_address {
        Some(address) => tracing::info!("Wallet connected: {}", address),
        None => tracing::warn!("No WALLET_ADDRESS set; the tank stays empty"),
    }

    let services = AppServices::build(&config, api, wallet, Arc::new(TracingNotifier));

    // Start background services
    let tasks = services::start_background_services(&services, &config);

    if config.run_demo_actions {
        run_demo_actions(&services).await;
    }

    tracing::info!("Running; press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down...");
    scheduler::stop_all(tasks).await;
    Ok(())
}

// One pass over every write flow, for poking at a running mock API.
async fn run_demo_actions(services: &AppServices) {
    services.aquarium.refresh_from_wallet(services.wallet.as_ref()).await;

    if let Err(e) = services.actions.spawn_fish().await {
        tracing::warn!("Demo spawn did not complete: {} ({})", e, e.code());
    }
    if let Err(e) = services.actions.clean_ocean().await {
        tracing::warn!("Demo clean did not complete: {} ({})", e, e.code());
    }

    if services.sponsor.is_sponsor() {
        let mut form = SponsorMintForm {
            recipient: constants::MOCK_USER_ADDRESS_1.to_string(),
            fish_name: "SponsoredFish".to_string(),
            initial_hype: "50".to_string(),
        };
        if let Err(e) = services.sponsor.sponsor_mint(&mut form).await {
            tracing::warn!("Demo sponsor mint did not complete: {}", e);
        }
    } else if let Err(e) = services.sponsor.register_sponsor().await {
        tracing::warn!("Demo sponsor registration did not complete: {}", e);
    }

    services::log_tank(&services.store).await;
}
