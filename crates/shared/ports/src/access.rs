use distmarket_core::{Address, Role};

/// Port for capability checks
///
/// How roles are granted is outside the market; it only asks.
pub trait RoleRegistry: Send + Sync {
    /// Returns true if `address` currently holds `role`
    fn has_role(&self, address: &Address, role: Role) -> bool;
}

/// Port for the source of a market's realized outcome
pub trait Oracle: Send + Sync {
    /// The certified outcome, or None while it is not yet known
    fn resolution_value(&self) -> Option<f64>;

    /// Get the oracle's name/identifier for debugging
    fn name(&self) -> &str {
        "Oracle"
    }
}
