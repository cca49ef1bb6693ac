use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conserved-value amount - uses Decimal for exact fixed-point arithmetic
pub type Amount = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Identifier of a market instance
pub type MarketId = Uuid;

/// Number of decimal places a ledger amount may carry
pub const AMOUNT_SCALE: u32 = 8;

/// Returns true if `amount` is strictly positive and fits the ledger scale
pub fn is_valid_amount(amount: Amount) -> bool {
    amount > Decimal::ZERO && amount.normalize().scale() <= AMOUNT_SCALE
}

/// Round toward zero to the ledger scale
///
/// Every conversion into a ledger amount goes through this function so that
/// repeated computations of the same quantity always agree to the last unit.
pub fn round_amount(value: Decimal) -> Amount {
    value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::ToZero)
}

/// Account address in the ledger
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&Address> for Address {
    fn from(value: &Address) -> Self {
        value.clone()
    }
}
