//! Distribution Market Core Domain
//!
//! Pure domain types shared by the ledger and the market.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Distribution, Event, EventKind, MarketState, Position, Role};
pub use values::{AMOUNT_SCALE, Address, Amount, MarketId, Timestamp, is_valid_amount, round_amount};
