use serde::{Deserialize, Serialize};

use super::FishRecord;

// ==================== STATS ====================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcosystemStats {
    pub pollution_level: i64,
    pub total_population: i64,
    pub active_sponsors: i64,
}

// ==================== LEADERBOARD ====================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub address: String,
    pub score: i64,
}

// ==================== SIMULATION ENDPOINTS ====================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HypeResponse {
    #[serde(default)]
    pub hype_increase: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnRequest<'a> {
    pub user_address: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnResponse {
    pub message: String,
    #[serde(default)]
    pub fish: Option<FishRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanRequest {
    pub cleaning_power: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanResponse {
    pub message: String,
    #[serde(default)]
    pub new_pollution_level: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_request_uses_camel_case_body() {
        let body = serde_json::to_value(CleanRequest { cleaning_power: 10 }).unwrap();
        assert_eq!(body, serde_json::json!({ "cleaningPower": 10 }));
    }

    #[test]
    fn spawn_response_tolerates_missing_fish() {
        let resp: SpawnResponse =
            serde_json::from_str(r#"{"message":"Fish spawned successfully (simulated)"}"#).unwrap();
        assert!(resp.fish.is_none());
        assert_eq!(resp.message, "Fish spawned successfully (simulated)");
    }

    #[test]
    fn stats_decode_from_mock_shape() {
        let stats: EcosystemStats = serde_json::from_str(
            r#"{"pollutionLevel":15,"totalPopulation":123,"activeSponsors":2}"#,
        )
        .unwrap();
        assert_eq!(stats.pollution_level, 15);
        assert_eq!(stats.active_sponsors, 2);
    }
}
