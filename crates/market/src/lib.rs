//! Distribution Market
//!
//! An automated market maker whose state is a normal distribution rather
//! than a discrete price. Traders move the market's belief `(mean, std_dev)`
//! and pay the potential difference of a liquidity-scaled cost function;
//! after an oracle finalizes the outcome, positions are settled with a
//! scoring rule out of the market's backing.
//!
//! ## Architecture
//!
//! ```text
//!   caller ──► MarketService (tokio RwLock, one transaction at a time)
//!                  │
//!                  ▼
//!   ┌──────────────────────────────────────────────────────┐
//!   │                 DistributionMarket                    │
//!   │  1. role check ─────────────► RoleRegistry            │
//!   │  2. state check (Uninitialized/Active/Paused/Final.)  │
//!   │  3. price ──────────────────► CostFunction (Φ diff)   │
//!   │  4. balances ───────────────► BalanceStore (Ledger)   │
//!   │  5. mutate positions / backing / LP shares            │
//!   │  6. append ─────────────────► EventLog                │
//!   └──────────────────────────────────────────────────────┘
//!                  │ finalize
//!                  ▼
//!            SettlementBook ──► claim_settlement / claim_liquidity
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use distribution_market::{DistributionMarket, MarketConfig};
//! use distmarket_ledger::{EventLog, Ledger};
//!
//! let log = EventLog::with_system_clock();
//! let mut market = DistributionMarket::new(MarketConfig::default(), ledger, roles, log);
//!
//! market.initialize_market(100.0, 10.0, dec!(1000), 1.0, "lp_1")?;
//! let trade = market.trade(105.0, 8.0, "trader_1", dec!(100))?;
//! market.finalize_market(102.0, &oracle)?;
//! market.claim_settlement("trader_1")?;
//! ```

pub mod application;
pub mod config;
pub mod error;
pub mod pricing;
pub mod settlement;

// Re-export main types for convenience
pub use application::{DistributionMarket, MarketService, MarketSnapshot};
pub use config::{ConfigError, MarketConfig};
pub use error::{MarketError, Result};
pub use pricing::{CostFunction, MAX_DEPTH, maximum_k, minimum_std_dev};
pub use settlement::{SettlementBook, entitlement, score};
