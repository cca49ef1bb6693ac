use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a distribution market
///
/// ```text
/// Uninitialized ──► Active ◄──► Paused
///                     │           │
///                     └──► Finalized ◄┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarketState {
    /// Constructed but not yet seeded with liquidity
    #[default]
    Uninitialized,
    /// Accepting trades and liquidity changes
    Active,
    /// Trading halted by an admin, reads still allowed
    Paused,
    /// Outcome recorded; only settlement is possible
    Finalized,
}

impl MarketState {
    /// Returns true if trades and liquidity changes are accepted
    pub fn is_trading(&self) -> bool {
        matches!(self, MarketState::Active)
    }

    /// Returns true if the market may move to Finalized
    pub fn can_finalize(&self) -> bool {
        matches!(self, MarketState::Active | MarketState::Paused)
    }

    /// Returns true if the market can never change state again
    pub fn is_terminal(&self) -> bool {
        matches!(self, MarketState::Finalized)
    }
}

impl fmt::Display for MarketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MarketState::Uninitialized => "Uninitialized",
            MarketState::Active => "Active",
            MarketState::Paused => "Paused",
            MarketState::Finalized => "Finalized",
        };
        f.write_str(name)
    }
}
