use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Distribution;
use crate::values::{Address, Amount, Timestamp};

/// A trader's stake in a distribution market
///
/// Created on the trader's first trade and updated on every later one.
/// Positions are never removed; once fully settled they stay as closed
/// records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Ledger address that owns this position
    pub owner: Address,

    /// Mean the trader last committed to
    pub mean: f64,

    /// Standard deviation the trader last committed to
    pub std_dev: f64,

    /// Net collateral paid into the market for this position
    ///
    /// Refunds only ever return this trader's own collateral, so it never
    /// goes negative.
    pub collateral_committed: Amount,

    /// Refund owed by the market but not paid out in cash
    ///
    /// Earned when a move lowers the potential by more than the trader has
    /// committed; spent against the trader's later charges.
    #[serde(default)]
    pub credit: Amount,

    /// Running total already paid out at settlement
    pub settled_amount: Amount,

    /// False once the full payout has been claimed
    pub open: bool,

    /// Number of trades applied to this position
    pub trade_count: u64,

    /// When the position was opened
    pub opened_at: Timestamp,

    /// Last update time
    pub updated_at: Timestamp,
}

impl Position {
    /// Create a new open position
    pub fn new(
        owner: Address,
        distribution: Distribution,
        collateral: Amount,
        now: Timestamp,
    ) -> Self {
        Self {
            owner,
            mean: distribution.mean,
            std_dev: distribution.std_dev,
            collateral_committed: collateral,
            credit: Decimal::ZERO,
            settled_amount: Decimal::ZERO,
            open: true,
            trade_count: 0,
            opened_at: now,
            updated_at: now,
        }
    }

    /// The distribution this position currently commits to
    pub fn distribution(&self) -> Distribution {
        Distribution::new(self.mean, self.std_dev)
    }

    /// Cash that moves for a trade priced at `cost`
    ///
    /// Positive is charged to the trader, negative is refunded. Charges are
    /// paid from credit first; refunds are capped at the committed collateral
    /// and the remainder becomes credit.
    pub fn cash_for(&self, cost: Amount) -> Amount {
        if cost >= Decimal::ZERO {
            cost - cost.min(self.credit)
        } else {
            -(-cost).min(self.exposure())
        }
    }

    /// Record a trade at `cost`; returns the cash that moved
    pub fn apply_trade(&mut self, distribution: Distribution, cost: Amount, now: Timestamp) -> Amount {
        let cash = self.cash_for(cost);
        if cost >= Decimal::ZERO {
            self.credit -= cost - cash;
        } else {
            self.credit += -cost + cash;
        }
        self.collateral_committed += cash;

        self.mean = distribution.mean;
        self.std_dev = distribution.std_dev;
        self.trade_count += 1;
        self.updated_at = now;
        cash
    }

    /// Collateral that counts towards settlement
    pub fn exposure(&self) -> Amount {
        self.collateral_committed.max(Decimal::ZERO)
    }

    /// Amount still owed against a total payout of `payout`
    pub fn outstanding(&self, payout: Amount) -> Amount {
        (payout - self.settled_amount).max(Decimal::ZERO)
    }

    /// Record a settlement payment and close the position once `payout` is reached
    pub fn record_settlement(&mut self, paid: Amount, payout: Amount, now: Timestamp) {
        self.settled_amount += paid;
        if self.settled_amount >= payout {
            self.open = false;
        }
        self.updated_at = now;
    }

    /// Close a position that has nothing left to collect
    pub fn close(&mut self, now: Timestamp) {
        self.open = false;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn position() -> Position {
        Position::new(
            Address::from("trader_1"),
            Distribution::new(100.0, 10.0),
            dec!(0),
            Utc::now(),
        )
    }

    #[test]
    fn test_apply_trade_accumulates_cost() {
        let mut pos = position();
        assert_eq!(pos.apply_trade(Distribution::new(105.0, 8.0), dec!(84.5), Utc::now()), dec!(84.5));
        assert_eq!(pos.apply_trade(Distribution::new(103.0, 9.0), dec!(-20.25), Utc::now()), dec!(-20.25));

        assert_eq!(pos.collateral_committed, dec!(64.25));
        assert_eq!(pos.credit, dec!(0));
        assert_eq!(pos.trade_count, 2);
        assert_eq!(pos.distribution(), Distribution::new(103.0, 9.0));
        assert!(pos.open);
    }

    #[test]
    fn test_refund_capped_at_own_collateral() {
        let mut pos = position();
        pos.apply_trade(Distribution::new(104.0, 9.0), dec!(10), Utc::now());

        let cash = pos.apply_trade(Distribution::new(99.0, 10.0), dec!(-25), Utc::now());
        assert_eq!(cash, dec!(-10));
        assert_eq!(pos.collateral_committed, dec!(0));
        assert_eq!(pos.credit, dec!(15));
        assert_eq!(pos.exposure(), dec!(0));
    }

    #[test]
    fn test_credit_pays_later_charges() {
        let mut pos = position();
        assert_eq!(pos.apply_trade(Distribution::new(100.0, 10.0), dec!(-30), Utc::now()), dec!(0));
        assert_eq!(pos.credit, dec!(30));

        // Undoing the move is free, moving further costs cash again
        assert_eq!(pos.cash_for(dec!(30)), dec!(0));
        assert_eq!(pos.apply_trade(Distribution::new(110.0, 8.0), dec!(45), Utc::now()), dec!(15));
        assert_eq!(pos.credit, dec!(0));
        assert_eq!(pos.collateral_committed, dec!(15));
    }

    #[test]
    fn test_close() {
        let mut pos = position();
        pos.close(Utc::now());
        assert!(!pos.open);
        assert_eq!(pos.settled_amount, dec!(0));
    }

    #[test]
    fn test_partial_then_full_settlement() {
        let mut pos = position();
        pos.apply_trade(Distribution::new(105.0, 8.0), dec!(80), Utc::now());

        assert_eq!(pos.outstanding(dec!(50)), dec!(50));
        pos.record_settlement(dec!(30), dec!(50), Utc::now());
        assert!(pos.open);
        assert_eq!(pos.outstanding(dec!(50)), dec!(20));

        pos.record_settlement(dec!(20), dec!(50), Utc::now());
        assert!(!pos.open);
        assert_eq!(pos.outstanding(dec!(50)), dec!(0));
    }
}
