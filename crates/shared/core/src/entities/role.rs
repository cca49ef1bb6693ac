use serde::{Deserialize, Serialize};

/// Capability a ledger address may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Certifies the realized outcome and finalizes markets
    Oracle,
    /// Pauses and resumes markets
    Admin,
    /// Trades and provides liquidity when trading is restricted
    User,
}
