use std::sync::Arc;

use distmarket_core::{Address, Amount, Event, MarketState, Position};
use distmarket_ledger::{EventLog, Ledger};
use distmarket_ports::{BalanceStore, Oracle};
use tokio::sync::RwLock;

use super::market::{DistributionMarket, MarketSnapshot};
use crate::error::Result;

/// Shared, async handle to a single market
///
/// Mutations take the write lock, so transactions on one market run one at
/// a time. Queries take the read lock and see a consistent snapshot. Cloning
/// the service shares the market.
pub struct MarketService<L: BalanceStore = Ledger> {
    market: Arc<RwLock<DistributionMarket<L>>>,
    events: EventLog,
}

impl<L: BalanceStore> Clone for MarketService<L> {
    fn clone(&self) -> Self {
        Self {
            market: Arc::clone(&self.market),
            events: self.events.clone(),
        }
    }
}

impl<L: BalanceStore> MarketService<L> {
    pub fn new(market: DistributionMarket<L>) -> Self {
        let events = market.events().clone();
        Self {
            market: Arc::new(RwLock::new(market)),
            events,
        }
    }

    /// Event log of the market; reading it does not take the market lock
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub async fn initialize_market(
        &self,
        mean: f64,
        std_dev: f64,
        backing: Amount,
        k: f64,
        lp_address: Address,
    ) -> Result<Event> {
        self.market
            .write()
            .await
            .initialize_market(mean, std_dev, backing, k, lp_address)
    }

    pub async fn trade(
        &self,
        new_mean: f64,
        new_std_dev: f64,
        trader: Address,
        max_collateral: Amount,
    ) -> Result<Event> {
        self.market
            .write()
            .await
            .trade(new_mean, new_std_dev, trader, max_collateral)
    }

    pub async fn quote_trade(&self, new_mean: f64, new_std_dev: f64) -> Result<Amount> {
        self.market.read().await.quote_trade(new_mean, new_std_dev)
    }

    pub async fn quote_trade_for(
        &self,
        new_mean: f64,
        new_std_dev: f64,
        trader: &Address,
    ) -> Result<Amount> {
        self.market
            .read()
            .await
            .quote_trade_for(new_mean, new_std_dev, trader)
    }

    pub async fn pause(&self, caller: &Address) -> Result<Event> {
        self.market.write().await.pause(caller)
    }

    pub async fn unpause(&self, caller: &Address) -> Result<Event> {
        self.market.write().await.unpause(caller)
    }

    pub async fn finalize_market(&self, final_value: f64, caller: &Address) -> Result<Event> {
        self.market.write().await.finalize_market(final_value, caller)
    }

    pub async fn finalize_from_oracle(
        &self,
        oracle: Arc<dyn Oracle>,
        caller: &Address,
    ) -> Result<Event> {
        self.market
            .write()
            .await
            .finalize_from_oracle(oracle.as_ref(), caller)
    }

    pub async fn claim_settlement(&self, trader: Address) -> Result<Event> {
        self.market.write().await.claim_settlement(trader)
    }

    pub async fn add_liquidity(&self, amount: Amount, provider: Address) -> Result<Event> {
        self.market.write().await.add_liquidity(amount, provider)
    }

    pub async fn remove_liquidity(&self, shares: Amount, provider: Address) -> Result<Event> {
        self.market.write().await.remove_liquidity(shares, provider)
    }

    pub async fn claim_liquidity(&self, provider: Address) -> Result<Event> {
        self.market.write().await.claim_liquidity(provider)
    }

    pub async fn balance_of(&self, address: &Address) -> Amount {
        self.market.read().await.ledger().balance_of(address)
    }

    pub async fn state(&self) -> MarketState {
        self.market.read().await.state()
    }

    pub async fn backing(&self) -> Amount {
        self.market.read().await.backing()
    }

    pub async fn position(&self, trader: &Address) -> Option<Position> {
        self.market.read().await.position(trader).cloned()
    }

    pub async fn snapshot(&self) -> MarketSnapshot {
        self.market.read().await.snapshot()
    }

    pub async fn verify_invariants(&self) -> Result<()> {
        self.market.read().await.verify_invariants()
    }
}
