//! Scenario configuration
//!
//! A scenario is plain JSON:
//!
//! ```json
//! {
//!   "name": "weather",
//!   "accounts": [
//!     { "address": "lp_1", "balance": "1000" },
//!     { "address": "admin", "roles": ["Admin"] }
//!   ],
//!   "seed": { "mean": 100.0, "std_dev": 10.0, "backing": "1000", "k": 1.0, "lp_address": "lp_1" },
//!   "steps": [
//!     { "action": "trade", "trader": "trader_1", "mean": 105.0, "std_dev": 8.0, "max_collateral": "100" },
//!     { "action": "finalize", "caller": "oracle", "value": 102.0 }
//!   ]
//! }
//! ```

use std::path::Path;

use distmarket_core::{Address, Amount, Role};
use distribution_market::{ConfigError, MarketConfig};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root configuration of a scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default = "default_scenario_name")]
    pub name: String,

    /// Market settings
    #[serde(default)]
    pub market: MarketConfig,

    /// Accounts funded (and granted roles) before the market opens
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,

    /// Parameters for `initialize_market`
    pub seed: SeedConfig,

    /// Steps executed in order after initialization
    #[serde(default)]
    pub steps: Vec<Step>,

    /// Abort at the first failing step instead of recording it and moving on
    #[serde(default)]
    pub stop_on_error: bool,
}

fn default_scenario_name() -> String {
    "unnamed scenario".to_string()
}

/// A ledger account created at bootstrap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub address: Address,

    /// Minted into the account at bootstrap; zero means no mint
    #[serde(default)]
    pub balance: Amount,

    #[serde(default)]
    pub roles: Vec<Role>,
}

impl AccountConfig {
    pub fn funded(address: &str, balance: Amount) -> Self {
        Self {
            address: Address::from(address),
            balance,
            roles: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }
}

/// Seed parameters of the market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub mean: f64,
    pub std_dev: f64,
    pub backing: Amount,
    pub k: f64,
    pub lp_address: Address,
}

/// One scripted action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Trade {
        trader: Address,
        mean: f64,
        std_dev: f64,
        max_collateral: Amount,
    },
    Quote {
        mean: f64,
        std_dev: f64,
    },
    Pause {
        caller: Address,
    },
    Unpause {
        caller: Address,
    },
    Finalize {
        caller: Address,
        value: f64,
    },
    /// Publish the outcome on the scenario's oracle without finalizing
    ResolveOracle {
        value: f64,
    },
    FinalizeFromOracle {
        caller: Address,
    },
    Claim {
        trader: Address,
    },
    AddLiquidity {
        provider: Address,
        amount: Amount,
    },
    RemoveLiquidity {
        provider: Address,
        shares: Amount,
    },
    ClaimLiquidity {
        provider: Address,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Trade { .. } => "trade",
            Step::Quote { .. } => "quote",
            Step::Pause { .. } => "pause",
            Step::Unpause { .. } => "unpause",
            Step::Finalize { .. } => "finalize",
            Step::ResolveOracle { .. } => "resolve_oracle",
            Step::FinalizeFromOracle { .. } => "finalize_from_oracle",
            Step::Claim { .. } => "claim",
            Step::AddLiquidity { .. } => "add_liquidity",
            Step::RemoveLiquidity { .. } => "remove_liquidity",
            Step::ClaimLiquidity { .. } => "claim_liquidity",
        }
    }
}

impl ScenarioConfig {
    /// Load a scenario from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ScenarioError::Config(ConfigError::Io {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })
        })?;

        Self::from_json(&content)
    }

    /// Parse a scenario from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ScenarioError::Config(ConfigError::Parse(e.to_string())))?;
        config.market.validate()?;
        Ok(config)
    }

    /// The reference walkthrough: seed, trade, pause, finalize, settle
    pub fn demo() -> Self {
        let trader = Address::from("trader_1");
        let admin = Address::from("admin");

        Self {
            name: "demo".to_string(),
            market: MarketConfig::default(),
            accounts: vec![
                AccountConfig::funded("lp_1", dec!(1000)),
                AccountConfig::funded("trader_1", dec!(500)),
                AccountConfig::funded("admin", dec!(0)).with_role(Role::Admin),
                AccountConfig::funded("oracle", dec!(0)).with_role(Role::Oracle),
            ],
            seed: SeedConfig {
                mean: 100.0,
                std_dev: 10.0,
                backing: dec!(1000),
                k: 1.0,
                lp_address: Address::from("lp_1"),
            },
            steps: vec![
                Step::Trade {
                    trader: trader.clone(),
                    mean: 105.0,
                    std_dev: 8.0,
                    max_collateral: dec!(100),
                },
                Step::Pause {
                    caller: admin.clone(),
                },
                Step::Trade {
                    trader: trader.clone(),
                    mean: 110.0,
                    std_dev: 6.0,
                    max_collateral: dec!(500),
                },
                Step::Unpause { caller: admin },
                Step::Finalize {
                    caller: Address::from("oracle"),
                    value: 102.0,
                },
                Step::Claim {
                    trader: trader.clone(),
                },
                Step::Claim { trader },
                Step::Claim {
                    trader: Address::from("lp_1"),
                },
                Step::ClaimLiquidity {
                    provider: Address::from("lp_1"),
                },
            ],
            stop_on_error: false,
        }
    }
}

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Bootstrap failed: {0}")]
    Bootstrap(String),

    #[error("Step {index} ({action}) failed: {reason}")]
    StepFailed {
        index: usize,
        action: &'static str,
        reason: String,
    },
}
