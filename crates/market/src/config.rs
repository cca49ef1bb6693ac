//! Market configuration
//!
//! Loaded from JSON; every field has a default so `{}` is a valid config.

use std::path::Path;

use distmarket_core::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Settings fixed for the lifetime of a market instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Ledger address holding the market's backing
    pub market_address: Address,

    /// Require the User role for trades and liquidity changes
    pub restrict_trading_to_users: bool,

    /// Smallest standard deviation a trade may commit to
    pub min_std_dev: f64,

    /// Largest standard deviation a trade may commit to
    pub max_std_dev: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            market_address: Address::from("market"),
            restrict_trading_to_users: false,
            min_std_dev: 1e-9,
            max_std_dev: 1e12,
        }
    }
}

impl MarketConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_market_address(mut self, address: impl Into<Address>) -> Self {
        self.market_address = address.into();
        self
    }

    pub fn with_restricted_trading(mut self) -> Self {
        self.restrict_trading_to_users = true;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.market_address.as_str().is_empty() {
            return Err(ConfigError::Invalid("market_address is empty".to_string()));
        }
        if !(self.min_std_dev.is_finite() && self.min_std_dev > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_std_dev must be positive, got {}",
                self.min_std_dev
            )));
        }
        if !(self.max_std_dev.is_finite() && self.max_std_dev >= self.min_std_dev) {
            return Err(ConfigError::Invalid(format!(
                "max_std_dev {} must be finite and at least min_std_dev {}",
                self.max_std_dev, self.min_std_dev
            )));
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
