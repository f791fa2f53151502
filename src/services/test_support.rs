// In-memory stand-in for the mock API, shared by the service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::{AppError, Result};
use crate::integrations::AquariumApi;
use crate::models::{
    CleanResponse, EcosystemStats, FishRecord, GrowthStage, HypeResponse, LeaderboardEntry,
    SpawnResponse,
};

pub fn record(id: &str, name: &str, owner: &str) -> FishRecord {
    FishRecord {
        id: id.to_string(),
        name: name.to_string(),
        growth_stage: GrowthStage::Fry,
        hype_level: 50.0,
        health: 100.0,
        owner: owner.to_string(),
    }
}

fn unavailable(endpoint: &str) -> AppError {
    AppError::UnexpectedStatus {
        endpoint: endpoint.to_string(),
        status: 500,
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub fishes: Mutex<HashMap<String, Vec<FishRecord>>>,
    pub pollution: Mutex<i64>,
    pub failing: AtomicBool,
    pub fish_calls: AtomicUsize,
    pub stats_calls: AtomicUsize,
    pub spawn_calls: AtomicUsize,
    pub clean_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.set_pollution(15);
        api
    }

    pub fn with_fishes(owner: &str, records: Vec<FishRecord>) -> Self {
        let api = Self::new();
        api.set_fishes(owner, records);
        api
    }

    pub fn set_fishes(&self, owner: &str, records: Vec<FishRecord>) {
        self.fishes.lock().unwrap().insert(owner.to_string(), records);
    }

    pub fn set_pollution(&self, level: i64) {
        *self.pollution.lock().unwrap() = level;
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self, endpoint: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(unavailable(endpoint))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl AquariumApi for FakeApi {
    async fn fetch_fishes(&self, address: &str) -> Result<Vec<FishRecord>> {
        self.fish_calls.fetch_add(1, Ordering::SeqCst);
        self.check("/fishes")?;
        Ok(self
            .fishes
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_stats(&self) -> Result<EcosystemStats> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        self.check("/stats")?;
        let total_population = self
            .fishes
            .lock()
            .unwrap()
            .values()
            .map(|v| v.len() as i64)
            .sum();
        Ok(EcosystemStats {
            pollution_level: *self.pollution.lock().unwrap(),
            total_population,
            active_sponsors: 2,
        })
    }

    async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        self.check("/leaderboard")?;
        Ok(vec![
            LeaderboardEntry {
                rank: 1,
                address: "0x123...abc".to_string(),
                score: 5800,
            },
            LeaderboardEntry {
                rank: 2,
                address: "0x456...def".to_string(),
                score: 4500,
            },
        ])
    }

    async fn simulate_hype(&self) -> Result<HypeResponse> {
        self.check("/simulate/hype")?;
        Ok(HypeResponse {
            hype_increase: Some(42),
            message: Some("Simulated hype generated successfully.".to_string()),
        })
    }

    async fn simulate_spawn(&self, user_address: &str) -> Result<SpawnResponse> {
        self.spawn_calls.fetch_add(1, Ordering::SeqCst);
        self.check("/simulate/spawn")?;
        let mut fishes = self.fishes.lock().unwrap();
        let owned = fishes.entry(user_address.to_string()).or_default();
        let id = (owned.len() + 100).to_string();
        let fish = record(&id, &format!("NewFish{id}"), user_address);
        owned.push(fish.clone());
        Ok(SpawnResponse {
            message: "Fish spawned successfully (simulated)".to_string(),
            fish: Some(fish),
        })
    }

    async fn simulate_clean(&self, cleaning_power: u32) -> Result<CleanResponse> {
        self.clean_calls.fetch_add(1, Ordering::SeqCst);
        self.check("/simulate/clean")?;
        let mut pollution = self.pollution.lock().unwrap();
        *pollution = (*pollution - i64::from(cleaning_power)).max(0);
        Ok(CleanResponse {
            message: "Ocean cleaned (simulated)".to_string(),
            new_pollution_level: Some(*pollution),
        })
    }
}
