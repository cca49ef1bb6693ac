//! Bootstrap - funding, roles and market setup
//!
//! Handles initial setup of a scenario:
//! - Minting the configured balances into a fresh ledger
//! - Granting roles
//! - Seeding the market with the LP's backing

use std::sync::Arc;

use distmarket_access::{RoleTable, SimpleOracle};
use distmarket_clock::{Clock, SystemClock};
use distmarket_ledger::{BalanceStore, EventLog, Ledger};
use distribution_market::DistributionMarket;
use log::info;
use rust_decimal::Decimal;

use crate::scenario::{ScenarioConfig, ScenarioError};

/// Everything a scenario needs, wired together and ready to run
pub struct SimulationBootstrap {
    pub market: DistributionMarket,
    pub roles: Arc<RoleTable>,
    pub oracle: Arc<SimpleOracle>,
}

impl SimulationBootstrap {
    /// Bootstrap with wall-clock timestamps
    pub fn from_config(config: &ScenarioConfig) -> Result<Self, ScenarioError> {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(config: &ScenarioConfig, clock: Arc<dyn Clock>) -> Result<Self, ScenarioError> {
        let events = EventLog::new(clock);
        let mut ledger = Ledger::new(events.clone());
        let roles = Arc::new(RoleTable::new());

        for account in &config.accounts {
            if account.balance > Decimal::ZERO {
                ledger.mint(&account.address, account.balance).map_err(|e| {
                    ScenarioError::Bootstrap(format!("funding {}: {}", account.address, e))
                })?;
            }
            for role in &account.roles {
                roles.grant(account.address.clone(), *role);
            }
        }
        info!(
            "Bootstrapped scenario={} accounts={} supply={}",
            config.name,
            config.accounts.len(),
            ledger.total_supply()
        );

        let mut market =
            DistributionMarket::new(config.market.clone(), ledger, roles.clone(), events);

        let seed = &config.seed;
        market
            .initialize_market(
                seed.mean,
                seed.std_dev,
                seed.backing,
                seed.k,
                seed.lp_address.clone(),
            )
            .map_err(|e| ScenarioError::Bootstrap(format!("initializing market: {}", e)))?;

        Ok(Self {
            market,
            roles,
            oracle: Arc::new(SimpleOracle::pending()),
        })
    }
}
