// View state shared by the animation loop, the pollers and the action flows.
//
// Each section has its own lock and is replaced wholesale by the service
// that owns it; nothing merges partial results.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::{EcosystemStats, Fish, LeaderboardEntry};

// ==================== AQUARIUM ====================
#[derive(Debug, Clone, Default)]
pub struct AquariumView {
    pub account: Option<String>,
    pub fishes: Vec<Fish>,
    pub loading: bool,
    pub error: Option<String>,
    /// Bumped by every load so a slow response cannot overwrite a newer one.
    generation: u64,
}

impl AquariumView {
    pub fn begin_load(&mut self, account: &str) -> u64 {
        self.generation += 1;
        self.account = Some(account.to_string());
        self.loading = true;
        self.error = None;
        self.generation
    }

    /// Apply a finished load. Returns false when a newer load superseded it.
    pub fn finish_load(&mut self, generation: u64, outcome: Result<Vec<Fish>, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        match outcome {
            Ok(fishes) => {
                self.fishes = fishes;
                self.error = None;
            }
            Err(message) => {
                self.fishes = Vec::new();
                self.error = Some(message);
            }
        }
        self.loading = false;
        true
    }

    /// No wallet: empty tank, no error, nothing loading.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.account = None;
        self.fishes = Vec::new();
        self.loading = false;
        self.error = None;
    }
}

// ==================== POLLED PANELS ====================
#[derive(Debug, Clone, Default)]
pub struct Panel<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> Panel<T> {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = data;
        self.loading = false;
        self.error = None;
        self.updated_at = Some(Utc::now());
    }

    pub fn fail(&mut self, empty: T, message: &str) {
        self.data = empty;
        self.loading = false;
        self.error = Some(message.to_string());
    }
}

pub type StatsPanel = Panel<Option<EcosystemStats>>;
pub type LeaderboardPanel = Panel<Vec<LeaderboardEntry>>;

/// Single owner of all view state.
#[derive(Debug, Default)]
pub struct ViewStore {
    pub aquarium: RwLock<AquariumView>,
    pub stats: RwLock<StatsPanel>,
    pub leaderboard: RwLock<LeaderboardPanel>,
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn aquarium_snapshot(&self) -> AquariumView {
        self.aquarium.read().await.clone()
    }

    pub async fn stats_snapshot(&self) -> StatsPanel {
        self.stats.read().await.clone()
    }

    pub async fn leaderboard_snapshot(&self) -> LeaderboardPanel {
        self.leaderboard.read().await.clone()
    }
}
