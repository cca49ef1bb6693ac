use serde::{Deserialize, Serialize};

use crate::values::{Address, Amount, Timestamp};

/// An immutable entry of the event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Position in the log, strictly increasing from 0
    pub sequence: u64,
    /// Time assigned at append, never earlier than the previous entry
    pub timestamp: Timestamp,
    /// Event name and ordered parameters
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    /// Event name, e.g. "Trade"
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Event payloads emitted by the ledger and the market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "params")]
pub enum EventKind {
    /// Balance movement; `from` is None for a mint, `to` is None for a burn
    Transfer {
        from: Option<Address>,
        to: Option<Address>,
        amount: Amount,
    },
    MarketInitialized {
        mean: f64,
        std_dev: f64,
        backing: Amount,
        k: f64,
        lp_address: Address,
    },
    Trade {
        trader: Address,
        new_mean: f64,
        new_std_dev: f64,
        cost: Amount,
    },
    MarketFinalized {
        final_value: f64,
    },
    PositionSettled {
        trader: Address,
        payout_delta: Amount,
    },
    MarketPaused,
    MarketResumed,
    LiquidityAdded {
        provider: Address,
        amount: Amount,
        shares: Amount,
    },
    LiquidityRemoved {
        provider: Address,
        amount: Amount,
        shares: Amount,
    },
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Transfer { .. } => "Transfer",
            EventKind::MarketInitialized { .. } => "MarketInitialized",
            EventKind::Trade { .. } => "Trade",
            EventKind::MarketFinalized { .. } => "MarketFinalized",
            EventKind::PositionSettled { .. } => "PositionSettled",
            EventKind::MarketPaused => "MarketPaused",
            EventKind::MarketResumed => "MarketResumed",
            EventKind::LiquidityAdded { .. } => "LiquidityAdded",
            EventKind::LiquidityRemoved { .. } => "LiquidityRemoved",
        }
    }
}
