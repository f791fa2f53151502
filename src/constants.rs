/// Application constants

// Arena geometry
pub const ARENA_WIDTH: f64 = 800.0;
pub const ARENA_HEIGHT: f64 = 550.0; // leaves room for the sand strip
pub const FISH_SIZE: f64 = 40.0;
pub const SPAWN_MARGIN: f64 = 25.0;

// Motion
pub const MAX_SPEED: f64 = 2.0;
pub const INITIAL_SPEED: f64 = 1.0;
pub const PERTURB_PROBABILITY: f64 = 0.01; // per axis, per tick
pub const PERTURB_AMPLITUDE: f64 = 0.25;

// Mock API
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5001/api";
pub const HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CLEANING_POWER: u32 = 10;

// Mock addresses
pub const MOCK_USER_ADDRESS_1: &str = "0xUSER1_MOCK_ADDRESS";
pub const MOCK_SPONSOR_ADDRESS: &str = "0xSPONSOR_MOCK_ADDRESS";

// Contract objects (replace after deployment)
pub const PACKAGE_ID: &str = "0xYOUR_PACKAGE_ID";
pub const ECOSYSTEM_STATE_ID: &str = "0xYOUR_ECOSYSTEM_SHARED_OBJECT_ID";
pub const TREASURY_CAP_ID: &str = "0xYOUR_TREASURY_CAP_OBJECT_ID";
pub const PLACEHOLDER_ID_PREFIX: &str = "0xYOUR_";
pub const FISH_MODULE: &str = "fish";

// Background task intervals
pub const FRAME_INTERVAL_MS: u64 = 16; // ~60 Hz
pub const STATS_POLL_INTERVAL_SECS: u64 = 10;
pub const LEADERBOARD_POLL_INTERVAL_SECS: u64 = 30;
pub const SNAPSHOT_INTERVAL_SECS: u64 = 5;
pub const WALLET_WATCH_INTERVAL_MS: u64 = 500;

// Simulated admin/sponsor latency
pub const REGISTER_DELAY_MS: u64 = 1000;
pub const MINT_DELAY_MS: u64 = 1500;

// User-facing messages
pub const FISH_LOAD_ERROR: &str = "Could not load fish data.";
pub const STATS_LOAD_ERROR: &str = "Could not load stats.";
pub const LEADERBOARD_LOAD_ERROR: &str = "Could not load leaderboard data.";
