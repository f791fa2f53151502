pub mod mock_api;

pub use mock_api::{AquariumApi, MockApiClient};
