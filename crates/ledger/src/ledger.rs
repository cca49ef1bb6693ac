use std::collections::BTreeMap;

use distmarket_core::{Address, Amount, EventKind, is_valid_amount};
use distmarket_ports::{BalanceStore, LedgerError, LedgerResult};
use log::debug;
use rust_decimal::Decimal;

use crate::EventLog;

/// In-memory conserved-value balance store
///
/// Invariants held after every call:
/// - no balance is negative
/// - sum of balances == total minted - total burned
#[derive(Debug)]
pub struct Ledger {
    balances: BTreeMap<Address, Amount>,
    total_minted: Amount,
    total_burned: Amount,
    events: EventLog,
}

impl Ledger {
    pub fn new(events: EventLog) -> Self {
        Self {
            balances: BTreeMap::new(),
            total_minted: Decimal::ZERO,
            total_burned: Decimal::ZERO,
            events,
        }
    }

    /// Handle to the log this ledger records transfers in
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn total_minted(&self) -> Amount {
        self.total_minted
    }

    pub fn total_burned(&self) -> Amount {
        self.total_burned
    }

    /// Addresses with a recorded balance, in address order
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.balances.iter()
    }

    /// Recompute the conservation invariant from scratch
    pub fn check_conservation(&self) -> bool {
        let no_negative = self.balances.values().all(|b| *b >= Decimal::ZERO);
        no_negative && self.total_supply() == self.total_minted - self.total_burned
    }

    fn validate(amount: Amount) -> LedgerResult<()> {
        if is_valid_amount(amount) {
            Ok(())
        } else {
            Err(LedgerError::InvalidAmount(amount))
        }
    }

    fn ensure_funds(&self, address: &Address, amount: Amount) -> LedgerResult<()> {
        let available = self.balance_of(address);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                address: address.clone(),
                available,
                requested: amount,
            });
        }
        Ok(())
    }
}

impl BalanceStore for Ledger {
    fn balance_of(&self, address: &Address) -> Amount {
        self.balances.get(address).copied().unwrap_or(Decimal::ZERO)
    }

    fn total_supply(&self) -> Amount {
        self.balances.values().copied().sum()
    }

    fn mint(&mut self, to: &Address, amount: Amount) -> LedgerResult<()> {
        Self::validate(amount)?;

        *self.balances.entry(to.clone()).or_insert(Decimal::ZERO) += amount;
        self.total_minted += amount;
        debug!("Minted to={} amount={}", to, amount);

        self.events.append(EventKind::Transfer {
            from: None,
            to: Some(to.clone()),
            amount,
        });
        Ok(())
    }

    fn burn(&mut self, from: &Address, amount: Amount) -> LedgerResult<()> {
        Self::validate(amount)?;
        self.ensure_funds(from, amount)?;

        if let Some(balance) = self.balances.get_mut(from) {
            *balance -= amount;
        }
        self.total_burned += amount;
        debug!("Burned from={} amount={}", from, amount);

        self.events.append(EventKind::Transfer {
            from: Some(from.clone()),
            to: None,
            amount,
        });
        Ok(())
    }

    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> LedgerResult<()> {
        Self::validate(amount)?;
        self.ensure_funds(from, amount)?;

        if from != to {
            if let Some(balance) = self.balances.get_mut(from) {
                *balance -= amount;
            }
            *self.balances.entry(to.clone()).or_insert(Decimal::ZERO) += amount;
        }
        debug!("Transferred from={} to={} amount={}", from, to, amount);

        self.events.append(EventKind::Transfer {
            from: Some(from.clone()),
            to: Some(to.clone()),
            amount,
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "Ledger"
    }
}
