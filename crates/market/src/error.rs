use distmarket_core::{Address, Amount, MarketState, Role};
use distmarket_ports::LedgerError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    #[error("Insufficient balance for {address}: available {available}, requested {requested}")]
    InsufficientBalance {
        address: Address,
        available: Amount,
        requested: Amount,
    },

    #[error("Slippage exceeded: cost {cost} above max collateral {max_collateral}")]
    SlippageExceeded { cost: Amount, max_collateral: Amount },

    #[error("Invalid market state: cannot {operation} while {state}")]
    InvalidMarketState {
        operation: &'static str,
        state: MarketState,
    },

    #[error("Unauthorized: {address} lacks role {role:?}")]
    Unauthorized { address: Address, role: Role },

    #[error("Already settled: {0}")]
    AlreadySettled(Address),

    #[error("Market not finalized (state: {0})")]
    MarketNotFinalized(MarketState),

    #[error("Zero liquidity: {0}")]
    ZeroLiquidity(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(Amount),

    #[error("Position not found: {0}")]
    PositionNotFound(Address),

    #[error("Insufficient shares for {provider}: held {held}, requested {requested}")]
    InsufficientShares {
        provider: Address,
        held: Amount,
        requested: Amount,
    },

    #[error("Insufficient liquidity: {0}")]
    InsufficientLiquidity(String),

    #[error("Oracle unavailable: {0} has no resolution value")]
    OracleUnavailable(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, MarketError>;

impl From<LedgerError> for MarketError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientBalance {
                address,
                available,
                requested,
            } => MarketError::InsufficientBalance {
                address,
                available,
                requested,
            },
            LedgerError::InvalidAmount(amount) => MarketError::InvalidAmount(amount),
        }
    }
}
