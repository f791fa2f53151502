// src/models/mod.rs
pub mod ecosystem;
pub mod fish;

pub use ecosystem::{
    CleanRequest,
    CleanResponse,
    EcosystemStats,
    HypeResponse,
    LeaderboardEntry,
    SpawnRequest,
    SpawnResponse,
};
pub use fish::{Facing, Fish, FishRecord, GrowthStage};
