use crate::constants::*;
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Mock API
    pub api_url: String,
    pub http_timeout_secs: u64,

    // Accounts
    pub fallback_user_address: String,
    pub sponsor_address: String,
    pub wallet_address: Option<String>,

    // Contract objects
    pub package_id: String,
    pub ecosystem_state_id: String,
    pub treasury_cap_id: String,
    pub submit_onchain: bool,

    // Arena / motion
    pub arena_width: f64,
    pub arena_height: f64,
    pub perturb_probability: f64,

    // Scheduling
    pub frame_interval_ms: u64,
    pub stats_poll_secs: u64,
    pub leaderboard_poll_secs: u64,
    pub snapshot_interval_secs: u64,

    // Actions
    pub cleaning_power: u32,
    pub register_delay_ms: u64,
    pub mint_delay_ms: u64,
    pub run_demo_actions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout_secs: HTTP_TIMEOUT_SECS,
            fallback_user_address: MOCK_USER_ADDRESS_1.to_string(),
            sponsor_address: MOCK_SPONSOR_ADDRESS.to_string(),
            wallet_address: None,
            package_id: PACKAGE_ID.to_string(),
            ecosystem_state_id: ECOSYSTEM_STATE_ID.to_string(),
            treasury_cap_id: TREASURY_CAP_ID.to_string(),
            submit_onchain: false,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            perturb_probability: PERTURB_PROBABILITY,
            frame_interval_ms: FRAME_INTERVAL_MS,
            stats_poll_secs: STATS_POLL_INTERVAL_SECS,
            leaderboard_poll_secs: LEADERBOARD_POLL_INTERVAL_SECS,
            snapshot_interval_secs: SNAPSHOT_INTERVAL_SECS,
            cleaning_power: DEFAULT_CLEANING_POWER,
            register_delay_ms: REGISTER_DELAY_MS,
            mint_delay_ms: MINT_DELAY_MS,
            run_demo_actions: false,
        }
    }
}

// Internal helper that parses an optional env var, keeping `default` when unset.
fn env_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => Ok(raw.trim().parse()?),
        _ => Ok(default),
    }
}

// Internal helper that reads boolean-ish flags (1/true/yes/on).
fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| {
            let normalized = v.trim().to_ascii_lowercase();
            normalized == "1" || normalized == "true" || normalized == "yes" || normalized == "on"
        })
        .unwrap_or(false)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Config::default();

        Ok(Config {
            api_url: env::var("AQUACHAIN_API_URL").unwrap_or(defaults.api_url),
            http_timeout_secs: env_or("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,

            fallback_user_address: env::var("FALLBACK_USER_ADDRESS")
                .unwrap_or(defaults.fallback_user_address),
            sponsor_address: env::var("SPONSOR_ADDRESS").unwrap_or(defaults.sponsor_address),
            wallet_address: env::var("WALLET_ADDRESS")
                .ok()
                .filter(|s| !s.trim().is_empty()),

            package_id: env::var("PACKAGE_ID").unwrap_or(defaults.package_id),
            ecosystem_state_id: env::var("ECOSYSTEM_STATE_ID")
                .unwrap_or(defaults.ecosystem_state_id),
            treasury_cap_id: env::var("TREASURY_CAP_ID").unwrap_or(defaults.treasury_cap_id),
            submit_onchain: env_flag("SUBMIT_ONCHAIN"),

            arena_width: env_or("ARENA_WIDTH", defaults.arena_width)?,
            arena_height: env_or("ARENA_HEIGHT", defaults.arena_height)?,
            perturb_probability: env_or("PERTURB_PROBABILITY", defaults.perturb_probability)?,

            frame_interval_ms: env_or("FRAME_INTERVAL_MS", defaults.frame_interval_ms)?,
            stats_poll_secs: env_or("STATS_POLL_SECS", defaults.stats_poll_secs)?,
            leaderboard_poll_secs: env_or("LEADERBOARD_POLL_SECS", defaults.leaderboard_poll_secs)?,
            snapshot_interval_secs: env_or(
                "SNAPSHOT_INTERVAL_SECS",
                defaults.snapshot_interval_secs,
            )?,

            cleaning_power: env_or("CLEANING_POWER", defaults.cleaning_power)?,
            register_delay_ms: env_or("REGISTER_DELAY_MS", defaults.register_delay_ms)?,
            mint_delay_ms: env_or("MINT_DELAY_MS", defaults.mint_delay_ms)?,
            run_demo_actions: env_flag("RUN_DEMO_ACTIONS"),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Err(e) = url::Url::parse(&self.api_url) {
            anyhow::bail!("AQUACHAIN_API_URL is invalid: {}", e);
        }
        if !self.arena_width.is_finite() || !self.arena_height.is_finite() {
            anyhow::bail!(
                "Arena size must be finite, got {}x{}",
                self.arena_width,
                self.arena_height
            );
        }
        if self.arena_width <= SPAWN_MARGIN * 2.0 || self.arena_height <= SPAWN_MARGIN * 2.0 {
            anyhow::bail!(
                "Arena {}x{} is too small for the spawn margin",
                self.arena_width,
                self.arena_height
            );
        }
        if !(0.0..=1.0).contains(&self.perturb_probability) {
            anyhow::bail!("PERTURB_PROBABILITY must be within [0, 1]");
        }
        if self.frame_interval_ms == 0
            || self.stats_poll_secs == 0
            || self.leaderboard_poll_secs == 0
            || self.snapshot_interval_secs == 0
        {
            anyhow::bail!("Frame and poll intervals must be > 0");
        }
        if self.http_timeout_secs == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECS must be > 0");
        }

        if self.package_id.starts_with(PLACEHOLDER_ID_PREFIX) {
            tracing::warn!("Using placeholder package id");
        }
        if self.ecosystem_state_id.starts_with(PLACEHOLDER_ID_PREFIX) {
            tracing::warn!("Using placeholder ecosystem state id");
        }
        if self.treasury_cap_id.starts_with(PLACEHOLDER_ID_PREFIX) {
            tracing::warn!("Using placeholder treasury cap id");
        }
        if self.submit_onchain && self.wallet_address.is_none() {
            tracing::warn!("SUBMIT_ONCHAIN is set but no WALLET_ADDRESS is connected");
        }

        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    pub fn stats_poll_interval(&self) -> Duration {
        Duration::from_secs(self.stats_poll_secs)
    }

    pub fn leaderboard_poll_interval(&self) -> Duration {
        Duration::from_secs(self.leaderboard_poll_secs)
    }

    pub fn snapshot_interval(&self) -> Duration {
        Duration::from_secs(self.snapshot_interval_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
