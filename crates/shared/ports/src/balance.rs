use distmarket_core::{Address, Amount};

use crate::error::LedgerResult;

/// Port for a conserved-value balance store
///
/// Total value changes only through `mint` and `burn`; `transfer` moves
/// value between addresses without creating or destroying any. Every
/// successful mutation is expected to be recorded as a `Transfer` event.
pub trait BalanceStore: Send + Sync {
    /// Current balance, zero for unknown addresses
    fn balance_of(&self, address: &Address) -> Amount;

    /// Sum of all balances
    fn total_supply(&self) -> Amount;

    /// Create `amount` of value at `to`
    fn mint(&mut self, to: &Address, amount: Amount) -> LedgerResult<()>;

    /// Destroy `amount` of value held by `from`
    fn burn(&mut self, from: &Address, amount: Amount) -> LedgerResult<()>;

    /// Atomically debit `from` and credit `to`
    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> LedgerResult<()>;

    /// Get the store's name/identifier for debugging
    fn name(&self) -> &str {
        "BalanceStore"
    }
}
