use distmarket_core::{Address, Amount};
use thiserror::Error;

/// Errors raised by a balance store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient balance for {address}: available {available}, requested {requested}")]
    InsufficientBalance {
        address: Address,
        available: Amount,
        requested: Amount,
    },

    #[error("Invalid amount: {0} (must be positive with at most 8 decimal places)")]
    InvalidAmount(Amount),
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
