// Move-call descriptions for the on-chain `fish` module.
//
// Nothing here talks to a node; calls are handed to a `WalletProvider`
// for signing or logged when the flow is simulated.

use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::constants::{FISH_MODULE, PLACEHOLDER_ID_PREFIX};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CallArg {
    /// Reference to an on-chain object by id.
    Object(String),
    /// Plain value encoded by the wallet.
    Pure(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveCall {
    pub target: String,
    pub arguments: Vec<CallArg>,
}

impl MoveCall {
    pub fn function(&self) -> &str {
        self.target.rsplit("::").next().unwrap_or(&self.target)
    }
}

/// Package and shared-object ids the `fish` module is deployed with.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    pub package_id: String,
    pub ecosystem_state_id: String,
    pub treasury_cap_id: String,
}

impl ChainConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            package_id: config.package_id.clone(),
            ecosystem_state_id: config.ecosystem_state_id.clone(),
            treasury_cap_id: config.treasury_cap_id.clone(),
        }
    }

    pub fn has_placeholders(&self) -> bool {
        [
            &self.package_id,
            &self.ecosystem_state_id,
            &self.treasury_cap_id,
        ]
        .iter()
        .any(|id| id.starts_with(PLACEHOLDER_ID_PREFIX))
    }

    fn target(&self, function: &str) -> String {
        format!("{}::{}::{}", self.package_id, FISH_MODULE, function)
    }

    /// `fish::mint` for an engagement-triggered spawn; one coin per fish.
    pub fn mint(&self, recipient: &str, fish_name: &str) -> MoveCall {
        MoveCall {
            target: self.target("mint"),
            arguments: vec![
                CallArg::Object(self.treasury_cap_id.clone()),
                CallArg::Object(self.ecosystem_state_id.clone()),
                CallArg::Pure(Value::from(1u64)),
                CallArg::Pure(Value::from(recipient)),
                CallArg::Pure(Value::from(fish_name)),
            ],
        }
    }

    pub fn clean_ocean(&self, cleaning_power: u32) -> MoveCall {
        MoveCall {
            target: self.target("clean_ocean"),
            arguments: vec![
                CallArg::Object(self.ecosystem_state_id.clone()),
                CallArg::Pure(Value::from(cleaning_power)),
            ],
        }
    }

    pub fn register_sponsor(&self, sponsor: &str) -> MoveCall {
        MoveCall {
            target: self.target("register_sponsor"),
            arguments: vec![
                CallArg::Object(self.ecosystem_state_id.clone()),
                CallArg::Pure(Value::from(sponsor)),
            ],
        }
    }

    pub fn sponsor_mint_fish(&self, recipient: &str, fish_name: &str, initial_hype: u64) -> MoveCall {
        MoveCall {
            target: self.target("sponsor_mint_fish"),
            arguments: vec![
                CallArg::Object(self.treasury_cap_id.clone()),
                CallArg::Object(self.ecosystem_state_id.clone()),
                CallArg::Pure(Value::from(1u64)),
                CallArg::Pure(Value::from(recipient)),
                CallArg::Pure(Value::from(fish_name)),
                CallArg::Pure(Value::from(initial_hype)),
            ],
        }
    }
}
