//! Distribution Market Ledger
//!
//! Bookkeeping collaborators of the market:
//!
//! ```text
//!  DistributionMarket
//!     │  mint / burn / transfer
//!     ▼
//!  ┌──────────┐  Transfer events  ┌──────────┐
//!  │  Ledger  │──────────────────►│ EventLog │◄── market events
//!  └──────────┘                   └──────────┘
//!                                      │
//!                                      ▼
//!                              events_since(index)
//! ```
//!
//! The [`Ledger`] is a conserved-value store: value only enters through
//! `mint` and only leaves through `burn`. The [`EventLog`] is a cloneable
//! handle so the ledger and the market append to the same ordered record.

mod event_log;
mod ledger;

pub use event_log::EventLog;
pub use ledger::Ledger;

// Re-export the ledger port and its errors for convenience
pub use distmarket_ports::{BalanceStore, LedgerError, LedgerResult};
