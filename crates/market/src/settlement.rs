//! Scoring rule and the settlement book
//!
//! At finalization the market freezes a [`SettlementBook`]. Every payout is
//! then a pure function of the book and a position, so repeated claims only
//! ever pay the difference between what is owed and what was already paid.
//!
//! ```text
//! q_i      = exp(−(x − μ_i)² / 2σ_i²)              score in (0, 1]
//! e_i      = max(collateral_i, 0) · q_i             entitlement
//! ratio    = min(1, B_F / Σ e_i)                    pro-rata haircut
//! payout_i = e_i · ratio                            rounded down
//! residual = B_F − Σ payout_i                       left to LP shares
//! ```
//!
//! Rounding is always toward zero, so Σ payout_i + Σ LP claims ≤ B_F.

use distmarket_core::{Amount, Distribution, MarketId, Position, Timestamp, round_amount};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places kept on the pro-rata ratio
const RATIO_SCALE: u32 = 18;

/// Score of a committed distribution against the realized value, in [0, 1]
pub fn score(distribution: &Distribution, final_value: f64) -> Decimal {
    let likelihood = distribution.relative_likelihood(final_value);
    Decimal::from_f64(likelihood)
        .unwrap_or(Decimal::ZERO)
        .clamp(Decimal::ZERO, Decimal::ONE)
}

/// Payout a position would receive with no haircut
pub fn entitlement(position: &Position, final_value: f64) -> Amount {
    round_amount(position.exposure() * score(&position.distribution(), final_value))
}

/// Frozen settlement terms of a finalized market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementBook {
    pub market_id: MarketId,

    /// Realized outcome
    pub final_value: f64,

    /// Market backing at the moment of finalization (B_F)
    pub backing_at_finalization: Amount,

    /// Σ entitlements over all positions
    pub total_entitlement: Amount,

    /// Haircut applied to every entitlement, 1 when fully covered
    pub payout_ratio: Decimal,

    /// Σ payouts over all positions
    pub total_payouts: Amount,

    /// Backing left after all trader payouts, owed to LP share holders
    pub residual_pool: Amount,

    /// LP shares outstanding at finalization
    pub lp_shares_at_finalization: Amount,

    pub finalized_at: Timestamp,
}

impl SettlementBook {
    pub fn compute<'a>(
        market_id: MarketId,
        final_value: f64,
        backing: Amount,
        positions: impl IntoIterator<Item = &'a Position> + Clone,
        lp_shares: Amount,
        finalized_at: Timestamp,
    ) -> Self {
        let total_entitlement: Amount = positions
            .clone()
            .into_iter()
            .map(|position| entitlement(position, final_value))
            .sum();

        let payout_ratio = if total_entitlement <= backing {
            Decimal::ONE
        } else {
            (backing / total_entitlement)
                .round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::ToZero)
        };

        let mut book = Self {
            market_id,
            final_value,
            backing_at_finalization: backing,
            total_entitlement,
            payout_ratio,
            total_payouts: Decimal::ZERO,
            residual_pool: Decimal::ZERO,
            lp_shares_at_finalization: lp_shares,
            finalized_at,
        };

        let total_payouts: Amount = positions
            .into_iter()
            .map(|position| book.payout(position))
            .sum();
        book.total_payouts = total_payouts;
        book.residual_pool = (backing - total_payouts).max(Decimal::ZERO);
        book
    }

    /// Total owed to a position over its lifetime
    pub fn payout(&self, position: &Position) -> Amount {
        round_amount(entitlement(position, self.final_value) * self.payout_ratio)
    }

    /// Share of the residual pool owed for `shares` LP shares
    pub fn lp_claim(&self, shares: Amount) -> Amount {
        if self.lp_shares_at_finalization <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        round_amount(self.residual_pool * shares / self.lp_shares_at_finalization)
    }
}
