//! Liquidity-scaled cost function
//!
//! The market prices a move of its belief from `old` to `new` as a potential
//! difference, `cost = Φ(new) − Φ(old)`, so any sequence of trades that ends
//! where it started costs exactly nothing in total.
//!
//! ```text
//! Φ(d) = (B0 / k) · (1 − ⟨ĝ(d), ĝ(d0)⟩)
//!
//!   d0  reference distribution (the seed belief)
//!   B0  seed backing
//!   k   liquidity parameter
//!   ĝ   density scaled to unit L2 norm
//! ```
//!
//! Φ is 0 at the reference, grows strictly as the belief moves away from it
//! (in mean or in spread) and is bounded by `B0 / k`. Each Φ is rounded to
//! the ledger scale before subtracting, so equal states always map to equal
//! amounts.
//!
//! Spread is also bounded from below by liquidity: a density scaled to L2
//! norm `k` peaks at `k / sqrt(σ√π)`, and that peak may not exceed the
//! backing `b`. Hence `σ ≥ k² / (b² √π)`, or equivalently
//! `k ≤ b · sqrt(σ√π)`.

use std::f64::consts::PI;

use distmarket_core::{Amount, Distribution, round_amount};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::error::{MarketError, Result};

/// Largest `B0 / k` accepted; every potential stays representable at amount scale
pub const MAX_DEPTH: f64 = 1e20;

/// Smallest spread the backing can support at liquidity `k`
pub fn minimum_std_dev(k: f64, backing: Amount) -> f64 {
    let b = backing.to_f64().unwrap_or(0.0);
    if b <= 0.0 {
        return f64::INFINITY;
    }
    (k * k) / (b * b * PI.sqrt())
}

/// Largest liquidity parameter the backing can support at spread `std_dev`
pub fn maximum_k(std_dev: f64, backing: Amount) -> f64 {
    let b = backing.to_f64().unwrap_or(0.0);
    b * (std_dev * PI.sqrt()).sqrt()
}

/// Potential-based cost function anchored at the seed distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostFunction {
    reference: Distribution,
    k: f64,
    depth: f64,
}

impl CostFunction {
    /// `k` must be positive and `seed_backing` positive; callers validate both
    ///
    /// Fails when `B0 / k` exceeds [`MAX_DEPTH`].
    pub fn new(reference: Distribution, seed_backing: Amount, k: f64) -> Result<Self> {
        let backing = seed_backing.to_f64().ok_or_else(|| {
            MarketError::InvalidParameter(format!("backing {} is not representable", seed_backing))
        })?;
        let depth = backing / k;
        if !depth.is_finite() || depth > MAX_DEPTH {
            return Err(MarketError::InvalidParameter(format!(
                "k {} too small for backing {}: potential depth {} exceeds {}",
                k, seed_backing, depth, MAX_DEPTH
            )));
        }
        Ok(Self {
            reference,
            k,
            depth,
        })
    }

    pub fn reference(&self) -> Distribution {
        self.reference
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    /// Upper bound of the potential, `B0 / k`
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Φ(d) in ledger units
    pub fn potential(&self, distribution: &Distribution) -> Result<Amount> {
        let raw = self.depth * (1.0 - distribution.overlap(&self.reference));
        Decimal::from_f64(raw).map(round_amount).ok_or_else(|| {
            MarketError::InvalidParameter(format!(
                "potential {} of ({}, {}) is not representable",
                raw, distribution.mean, distribution.std_dev
            ))
        })
    }

    /// Collateral charged for moving the market from `from` to `to`
    ///
    /// Negative when the move brings the belief closer to the reference; the
    /// market then refunds the trader, up to what they have committed.
    pub fn cost(&self, from: &Distribution, to: &Distribution) -> Result<Amount> {
        Ok(self.potential(to)? - self.potential(from)?)
    }
}
