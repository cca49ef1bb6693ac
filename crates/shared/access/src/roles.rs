use std::collections::HashSet;

use dashmap::DashMap;
use distmarket_core::{Address, Role};
use distmarket_ports::RoleRegistry;
use log::debug;

/// Concurrent address → roles table
///
/// Grants and revocations may happen while markets are reading it.
#[derive(Debug, Default)]
pub struct RoleTable {
    roles: DashMap<Address, HashSet<Role>>,
}

impl RoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style grant
    pub fn with_role(self, address: impl Into<Address>, role: Role) -> Self {
        self.grant(address, role);
        self
    }

    /// Grant `role` to `address`; returns false if it was already held
    pub fn grant(&self, address: impl Into<Address>, role: Role) -> bool {
        let address = address.into();
        debug!("Granting role={:?} address={}", role, address);
        self.roles.entry(address).or_default().insert(role)
    }

    /// Revoke `role` from `address`; returns false if it was not held
    pub fn revoke(&self, address: &Address, role: Role) -> bool {
        let removed = self
            .roles
            .get_mut(address)
            .map(|mut held| held.remove(&role))
            .unwrap_or(false);
        if removed {
            debug!("Revoked role={:?} address={}", role, address);
        }
        removed
    }

    /// All roles currently held by `address`
    pub fn roles_of(&self, address: &Address) -> Vec<Role> {
        self.roles
            .get(address)
            .map(|held| held.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl RoleRegistry for RoleTable {
    fn has_role(&self, address: &Address, role: Role) -> bool {
        self.roles
            .get(address)
            .is_some_and(|held| held.contains(&role))
    }
}
