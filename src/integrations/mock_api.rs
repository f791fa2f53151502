use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    CleanRequest, CleanResponse, EcosystemStats, FishRecord, HypeResponse, LeaderboardEntry,
    SpawnRequest, SpawnResponse,
};

/// Read and simulate endpoints of the aquarium backend.
#[async_trait::async_trait]
pub trait AquariumApi: Send + Sync {
    async fn fetch_fishes(&self, address: &str) -> Result<Vec<FishRecord>>;

    async fn fetch_stats(&self) -> Result<EcosystemStats>;

    async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>>;

    async fn simulate_hype(&self) -> Result<HypeResponse>;

    async fn simulate_spawn(&self, user_address: &str) -> Result<SpawnResponse>;

    async fn simulate_clean(&self, cleaning_power: u32) -> Result<CleanResponse>;
}

// Internal helper that turns a response into `T`, rejecting non-2xx statuses.
async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::UnexpectedStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.json().await?)
}

/// HTTP client for the local mock API.
#[derive(Clone, Debug)]
pub struct MockApiClient {
    base_url: Url,
    client: Client,
}

impl MockApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "API URL cannot be used as a base: {}",
                base_url
            )));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, config.http_timeout())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("Bad API base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        decode(url.path(), response).await
    }

    async fn post_json<B, T>(&self, segments: &[&str], body: Option<&B>) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        tracing::debug!("POST {}", url);
        let mut req = self.client.post(url.clone());
        if let Some(body) = body {
            req = req.json(body);
        }
        let response = req.send().await?;
        decode(url.path(), response).await
    }
}

#[async_trait::async_trait]
impl AquariumApi for MockApiClient {
    async fn fetch_fishes(&self, address: &str) -> Result<Vec<FishRecord>> {
        self.get_json(&["fishes", address]).await
    }

    async fn fetch_stats(&self) -> Result<EcosystemStats> {
        self.get_json(&["stats"]).await
    }

    async fn fetch_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        self.get_json(&["leaderboard"]).await
    }

    async fn simulate_hype(&self) -> Result<HypeResponse> {
        self.post_json::<(), _>(&["simulate", "hype"], None).await
    }

    async fn simulate_spawn(&self, user_address: &str) -> Result<SpawnResponse> {
        let body = SpawnRequest { user_address };
        self.post_json(&["simulate", "spawn"], Some(&body)).await
    }

    async fn simulate_clean(&self, cleaning_power: u32) -> Result<CleanResponse> {
        let body = CleanRequest { cleaning_power };
        self.post_json(&["simulate", "clean"], Some(&body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub server");
        });
        format!("http://{}/api", addr)
    }

    async fn fishes(Path(address): Path<String>) -> Json<Value> {
        if address != "0xUSER1_MOCK_ADDRESS" {
            return Json(json!([]));
        }
        Json(json!([
            { "id": "1", "name": "Nemo", "growthStage": 1, "hypeLevel": 150, "health": 90, "owner": address },
            { "id": "4", "name": "Coral", "growthStage": 0, "hypeLevel": 20, "health": 100, "owner": address },
        ]))
    }

    async fn spawn(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        match body.get("userAddress").and_then(|v| v.as_str()) {
            Some(address) => (
                StatusCode::CREATED,
                Json(json!({
                    "message": "Fish spawned successfully (simulated)",
                    "fish": { "id": "6", "name": "NewFish6", "growthStage": 0, "hypeLevel": 12, "health": 100, "owner": address }
                })),
            ),
            None => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "userAddress is required" })),
            ),
        }
    }

    async fn clean(Json(body): Json<Value>) -> Json<Value> {
        let power = body.get("cleaningPower").and_then(|v| v.as_i64()).unwrap_or(10);
        Json(json!({
            "message": "Ocean cleaned (simulated)",
            "newPollutionLevel": (15 - power).max(0),
        }))
    }

    fn stub_router() -> Router {
        Router::new()
            .route("/api/fishes/{address}", get(fishes))
            .route(
                "/api/stats",
                get(|| async {
                    Json(json!({ "pollutionLevel": 15, "totalPopulation": 123, "activeSponsors": 2 }))
                }),
            )
            .route(
                "/api/leaderboard",
                get(|| async {
                    Json(json!([
                        { "rank": 1, "address": "0x123...abc", "score": 5800 },
                        { "rank": 2, "address": "0x456...def", "score": 4500 },
                    ]))
                }),
            )
            .route(
                "/api/simulate/hype",
                post(|| async {
                    Json(json!({ "hypeIncrease": 42, "message": "Simulated hype generated successfully." }))
                }),
            )
            .route("/api/simulate/spawn", post(spawn))
            .route("/api/simulate/clean", post(clean))
    }

    fn client_for(base: &str) -> MockApiClient {
        MockApiClient::new(base, Duration::from_secs(5)).expect("client should build")
    }

    #[test]
    fn endpoint_appends_escaped_segments() {
        let client = client_for("http://127.0.0.1:5001/api/");
        let url = client.endpoint(&["fishes", "0x a/b"]).expect("endpoint");
        assert_eq!(url.as_str(), "http://127.0.0.1:5001/api/fishes/0x%20a%2Fb");
    }

    #[test]
    fn new_rejects_non_base_url() {
        let err = MockApiClient::new("mailto:fish@example.com", Duration::from_secs(1))
            .expect_err("mailto is not a base URL");
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[tokio::test]
    async fn fetches_fishes_stats_and_leaderboard() {
        let base = spawn_stub(stub_router()).await;
        let client = client_for(&base);

        let fishes = client
            .fetch_fishes("0xUSER1_MOCK_ADDRESS")
            .await
            .expect("fishes should load");
        assert_eq!(fishes.len(), 2);
        assert_eq!(fishes[0].name, "Nemo");

        let empty = client.fetch_fishes("0xNOBODY").await.expect("empty list");
        assert!(empty.is_empty());

        let stats = client.fetch_stats().await.expect("stats should load");
        assert_eq!(stats.total_population, 123);

        let leaders = client.fetch_leaderboard().await.expect("leaderboard");
        assert_eq!(leaders.len(), 2);
        assert_eq!(leaders[0].rank, 1);
    }

    #[tokio::test]
    async fn simulate_endpoints_send_expected_bodies() {
        let base = spawn_stub(stub_router()).await;
        let client = client_for(&base);

        let hype = client.simulate_hype().await.expect("hype");
        assert_eq!(hype.hype_increase, Some(42));

        let spawned = client
            .simulate_spawn("0xUSER1_MOCK_ADDRESS")
            .await
            .expect("spawn accepted with 201");
        assert_eq!(
            spawned.fish.map(|f| f.owner),
            Some("0xUSER1_MOCK_ADDRESS".to_string())
        );

        let cleaned = client.simulate_clean(10).await.expect("clean");
        assert_eq!(cleaned.new_pollution_level, Some(5));
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let router = Router::new().route(
            "/api/stats",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let base = spawn_stub(router).await;
        let client = client_for(&base);

        match client.fetch_stats().await {
            Err(AppError::UnexpectedStatus { endpoint, status }) => {
                assert_eq!(status, 503);
                assert_eq!(endpoint, "/api/stats");
            }
            other => panic!("expected status error, got {:?}", other),
        }

        // unknown route -> 404
        let missing = client.fetch_leaderboard().await.expect_err("404");
        assert_eq!(missing.code(), "UNEXPECTED_STATUS");
    }

    #[tokio::test]
    async fn connection_failure_is_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{}/api", addr));
        let err = client.fetch_stats().await.expect_err("nothing listens there");
        assert_eq!(err.code(), "HTTP_ERROR");
    }
}
