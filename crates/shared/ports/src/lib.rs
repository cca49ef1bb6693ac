//! Distribution Market Ports
//!
//! Port definitions (traits) for the distribution prediction market.
//! These define the boundaries between market logic and the collaborators
//! it consumes: the balance ledger, the role registry, the outcome oracle
//! and the clock.

mod access;
mod balance;
mod clock;
mod error;

pub use access::{Oracle, RoleRegistry};
pub use balance::BalanceStore;
pub use clock::Clock;
pub use error::{LedgerError, LedgerResult};
