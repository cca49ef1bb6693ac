use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use distmarket_core::{
    Address, Amount, Distribution, Event, EventKind, MarketId, MarketState, Position, Role,
    is_valid_amount, round_amount,
};
use distmarket_ledger::{EventLog, Ledger};
use distmarket_ports::{BalanceStore, Oracle, RoleRegistry};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::pricing::{CostFunction, minimum_std_dev};
use crate::settlement::SettlementBook;

/// Pricing state that exists once the market has been seeded
#[derive(Debug, Clone, Copy)]
struct Curve {
    pricing: CostFunction,
    current: Distribution,
}

/// Point-in-time view of a market, for reports and logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub id: MarketId,
    pub state: MarketState,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub k: Option<f64>,
    pub backing: Amount,
    pub final_value: Option<f64>,
    pub positions: usize,
    pub open_positions: usize,
    pub total_lp_shares: Amount,
}

/// Automated market maker over a normal distribution
///
/// Every public mutating method is a single transaction: it validates role,
/// state, parameters and balances first, and only then touches the ledger,
/// its own state and the event log. A failed call leaves no trace.
pub struct DistributionMarket<L: BalanceStore = Ledger> {
    id: MarketId,
    config: MarketConfig,
    ledger: L,
    roles: Arc<dyn RoleRegistry>,
    events: EventLog,
    state: MarketState,
    curve: Option<Curve>,
    backing: Amount,
    positions: BTreeMap<Address, Position>,
    lp_shares: BTreeMap<Address, Amount>,
    total_lp_shares: Amount,
    final_value: Option<f64>,
    settlement: Option<SettlementBook>,
    total_settled: Amount,
    total_lp_claimed: Amount,
}

impl<L: BalanceStore> DistributionMarket<L> {
    /// Create an uninitialized market
    ///
    /// `events` should be the same log the ledger records its transfers in.
    pub fn new(
        config: MarketConfig,
        ledger: L,
        roles: Arc<dyn RoleRegistry>,
        events: EventLog,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            ledger,
            roles,
            events,
            state: MarketState::Uninitialized,
            curve: None,
            backing: Decimal::ZERO,
            positions: BTreeMap::new(),
            lp_shares: BTreeMap::new(),
            total_lp_shares: Decimal::ZERO,
            final_value: None,
            settlement: None,
            total_settled: Decimal::ZERO,
            total_lp_claimed: Decimal::ZERO,
        }
    }

    pub fn with_id(mut self, id: MarketId) -> Self {
        self.id = id;
        self
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Seed the market with a belief and backing collateral from `lp_address`
    pub fn initialize_market(
        &mut self,
        initial_mean: f64,
        initial_std_dev: f64,
        initial_backing: Amount,
        initial_k: f64,
        lp_address: impl Into<Address>,
    ) -> Result<Event> {
        let lp_address = lp_address.into();

        if self.state != MarketState::Uninitialized {
            return Err(self.state_error("initialize"));
        }
        self.check_trading_role(&lp_address)?;

        let seed = Distribution::new(initial_mean, initial_std_dev);
        self.validate_distribution(&seed)?;
        if !initial_k.is_finite() {
            return Err(MarketError::InvalidParameter(format!(
                "k must be finite, got {}",
                initial_k
            )));
        }
        if initial_k <= 0.0 {
            return Err(MarketError::ZeroLiquidity(format!(
                "k must be positive, got {}",
                initial_k
            )));
        }
        if initial_backing <= Decimal::ZERO {
            return Err(MarketError::ZeroLiquidity(format!(
                "backing must be positive, got {}",
                initial_backing
            )));
        }
        self.validate_amount(initial_backing)?;
        self.check_liquidity_floor(initial_std_dev, initial_k, initial_backing)?;
        let pricing = CostFunction::new(seed, initial_backing, initial_k)?;
        self.validate_participant(&lp_address)?;
        self.ensure_funds(&lp_address, initial_backing)?;

        let market_address = self.config.market_address.clone();
        self.ledger
            .transfer(&lp_address, &market_address, initial_backing)?;

        let now = self.events.now();
        self.curve = Some(Curve {
            pricing,
            current: seed,
        });
        self.backing = initial_backing;
        self.positions.insert(
            lp_address.clone(),
            Position::new(lp_address.clone(), seed, initial_backing, now),
        );
        self.lp_shares.insert(lp_address.clone(), initial_backing);
        self.total_lp_shares = initial_backing;
        self.state = MarketState::Active;

        info!(
            "Market initialized id={} mean={} std_dev={} backing={} k={} lp={}",
            self.id, initial_mean, initial_std_dev, initial_backing, initial_k, lp_address
        );

        Ok(self.events.append(EventKind::MarketInitialized {
            mean: initial_mean,
            std_dev: initial_std_dev,
            backing: initial_backing,
            k: initial_k,
            lp_address,
        }))
    }

    /// Halt trading and liquidity changes
    pub fn pause(&mut self, caller: &Address) -> Result<Event> {
        self.check_role(caller, Role::Admin)?;
        if self.state != MarketState::Active {
            return Err(self.state_error("pause"));
        }

        self.state = MarketState::Paused;
        info!("Market paused id={} by={}", self.id, caller);
        Ok(self.events.append(EventKind::MarketPaused))
    }

    /// Resume a paused market
    pub fn unpause(&mut self, caller: &Address) -> Result<Event> {
        self.check_role(caller, Role::Admin)?;
        if self.state != MarketState::Paused {
            return Err(self.state_error("unpause"));
        }

        self.state = MarketState::Active;
        info!("Market resumed id={} by={}", self.id, caller);
        Ok(self.events.append(EventKind::MarketResumed))
    }

    /// Record the realized outcome; the caller must hold the Oracle role
    pub fn finalize_market(&mut self, final_value: f64, caller: &Address) -> Result<Event> {
        self.check_role(caller, Role::Oracle)?;
        self.finalize(final_value)
    }

    /// Finalize with the value certified by `oracle`
    ///
    /// The caller may be an Admin relaying the oracle, or the oracle itself.
    pub fn finalize_from_oracle(&mut self, oracle: &dyn Oracle, caller: &Address) -> Result<Event> {
        if !self.roles.has_role(caller, Role::Admin) {
            self.check_role(caller, Role::Oracle)?;
        }
        if !self.state.can_finalize() {
            return Err(self.state_error("finalize"));
        }
        let final_value = oracle
            .resolution_value()
            .ok_or_else(|| MarketError::OracleUnavailable(oracle.name().to_string()))?;

        self.finalize(final_value)
    }

    fn finalize(&mut self, final_value: f64) -> Result<Event> {
        if !self.state.can_finalize() {
            return Err(self.state_error("finalize"));
        }
        if !final_value.is_finite() {
            return Err(MarketError::InvalidParameter(format!(
                "final value must be finite, got {}",
                final_value
            )));
        }

        let book = SettlementBook::compute(
            self.id,
            final_value,
            self.backing,
            self.positions.values(),
            self.total_lp_shares,
            self.events.now(),
        );

        info!(
            "Market finalized id={} final_value={} backing={} payouts={} ratio={} residual={}",
            self.id,
            final_value,
            book.backing_at_finalization,
            book.total_payouts,
            book.payout_ratio,
            book.residual_pool
        );

        let now = self.events.now();
        for position in self.positions.values_mut() {
            if position.open && position.outstanding(book.payout(position)) <= Decimal::ZERO {
                position.close(now);
            }
        }

        self.state = MarketState::Finalized;
        self.final_value = Some(final_value);
        self.settlement = Some(book);

        Ok(self.events.append(EventKind::MarketFinalized { final_value }))
    }

    // ========================================================================
    // Trading
    // ========================================================================

    /// Cost of moving the market to the given belief, without trading
    ///
    /// This is the potential difference; what a given trader pays can be
    /// less, see [`quote_trade_for`](Self::quote_trade_for).
    pub fn quote_trade(&self, new_mean: f64, new_std_dev: f64) -> Result<Amount> {
        let curve = self.curve.ok_or_else(|| self.state_error("quote"))?;
        let target = Distribution::new(new_mean, new_std_dev);
        self.validate_distribution(&target)?;
        self.check_liquidity_floor(new_std_dev, curve.pricing.k(), self.backing)?;
        curve.pricing.cost(&curve.current, &target)
    }

    /// Cash `trader` would pay (positive) or receive (negative) for the move
    pub fn quote_trade_for(&self, new_mean: f64, new_std_dev: f64, trader: &Address) -> Result<Amount> {
        let cost = self.quote_trade(new_mean, new_std_dev)?;
        Ok(self.cash_for(trader, cost))
    }

    /// Move the market to a new belief, charging (or refunding) the cost
    ///
    /// A refund never exceeds the trader's own committed collateral; the rest
    /// is kept as credit against the trader's later charges. The `Trade`
    /// event and the slippage guard both use the cash that actually moves.
    pub fn trade(
        &mut self,
        new_mean: f64,
        new_std_dev: f64,
        trader_address: impl Into<Address>,
        max_collateral: Amount,
    ) -> Result<Event> {
        let trader = trader_address.into();

        if !self.state.is_trading() {
            return Err(self.state_error("trade"));
        }
        self.check_trading_role(&trader)?;
        let curve = self.curve.ok_or_else(|| self.state_error("trade"))?;

        let target = Distribution::new(new_mean, new_std_dev);
        self.validate_distribution(&target)?;
        self.check_liquidity_floor(new_std_dev, curve.pricing.k(), self.backing)?;
        self.validate_participant(&trader)?;

        let cost = curve.pricing.cost(&curve.current, &target)?;
        let cash = self.cash_for(&trader, cost);
        if cash > max_collateral {
            debug!(
                "Trade rejected trader={} cost={} max_collateral={}",
                trader, cash, max_collateral
            );
            return Err(MarketError::SlippageExceeded {
                cost: cash,
                max_collateral,
            });
        }

        let market_address = self.config.market_address.clone();
        if cash > Decimal::ZERO {
            self.ensure_funds(&trader, cash)?;
            self.ledger.transfer(&trader, &market_address, cash)?;
        } else if cash < Decimal::ZERO {
            let refund = -cash;
            self.ensure_backing(refund)?;
            self.ledger.transfer(&market_address, &trader, refund)?;
        }

        let now = self.events.now();
        self.backing += cash;
        self.curve = Some(Curve {
            current: target,
            ..curve
        });
        self.positions
            .entry(trader.clone())
            .or_insert_with(|| Position::new(trader.clone(), target, Decimal::ZERO, now))
            .apply_trade(target, cost, now);

        debug!(
            "Trade executed trader={} mean={} std_dev={} potential_cost={} cash={} backing={}",
            trader, new_mean, new_std_dev, cost, cash, self.backing
        );

        Ok(self.events.append(EventKind::Trade {
            trader,
            new_mean,
            new_std_dev,
            cost: cash,
        }))
    }

    // ========================================================================
    // Liquidity
    // ========================================================================

    /// Deposit collateral into the backing in exchange for LP shares
    pub fn add_liquidity(&mut self, amount: Amount, provider: impl Into<Address>) -> Result<Event> {
        let provider = provider.into();

        if !self.state.is_trading() {
            return Err(self.state_error("add liquidity"));
        }
        self.check_trading_role(&provider)?;
        self.validate_amount(amount)?;
        self.validate_participant(&provider)?;
        if let Some(curve) = self.curve {
            self.check_liquidity_floor(
                curve.current.std_dev,
                curve.pricing.k(),
                self.backing + amount,
            )?;
        }

        let shares = if self.total_lp_shares <= Decimal::ZERO || self.backing <= Decimal::ZERO {
            amount
        } else {
            round_amount(amount * self.total_lp_shares / self.backing)
        };
        if shares <= Decimal::ZERO {
            return Err(MarketError::InvalidAmount(amount));
        }
        self.ensure_funds(&provider, amount)?;

        let market_address = self.config.market_address.clone();
        self.ledger.transfer(&provider, &market_address, amount)?;

        self.backing += amount;
        *self.lp_shares.entry(provider.clone()).or_insert(Decimal::ZERO) += shares;
        self.total_lp_shares += shares;

        info!(
            "Liquidity added provider={} amount={} shares={} backing={}",
            provider, amount, shares, self.backing
        );

        Ok(self.events.append(EventKind::LiquidityAdded {
            provider,
            amount,
            shares,
        }))
    }

    /// Redeem LP shares at their pro-rata value of the backing
    ///
    /// Only backing not committed to positions can leave, so the payout is
    /// capped by [`free_liquidity`](Self::free_liquidity).
    pub fn remove_liquidity(&mut self, shares: Amount, provider: impl Into<Address>) -> Result<Event> {
        let provider = provider.into();

        if !self.state.is_trading() {
            return Err(self.state_error("remove liquidity"));
        }
        self.check_trading_role(&provider)?;
        self.validate_amount(shares)?;

        let held = self.lp_shares_of(&provider);
        if held < shares {
            return Err(MarketError::InsufficientShares {
                provider,
                held,
                requested: shares,
            });
        }

        let value = self.backing * shares / self.total_lp_shares;
        let amount = round_amount(value.min(self.free_liquidity()));
        if amount <= Decimal::ZERO {
            return Err(MarketError::InsufficientLiquidity(format!(
                "no uncommitted backing for {} shares",
                shares
            )));
        }
        if let Some(curve) = self.curve {
            let floor = minimum_std_dev(curve.pricing.k(), self.backing - amount);
            if curve.current.std_dev < floor {
                return Err(MarketError::InsufficientLiquidity(format!(
                    "withdrawing {} leaves std_dev {} below floor {}",
                    amount, curve.current.std_dev, floor
                )));
            }
        }

        let market_address = self.config.market_address.clone();
        self.ledger.transfer(&market_address, &provider, amount)?;

        self.backing -= amount;
        self.burn_shares(&provider, shares);

        info!(
            "Liquidity removed provider={} amount={} shares={} backing={}",
            provider, amount, shares, self.backing
        );

        Ok(self.events.append(EventKind::LiquidityRemoved {
            provider,
            amount,
            shares,
        }))
    }

    // ========================================================================
    // Settlement
    // ========================================================================

    /// Pay out whatever a trader is still owed after finalization
    pub fn claim_settlement(&mut self, trader_address: impl Into<Address>) -> Result<Event> {
        let trader = trader_address.into();

        let book = self
            .settlement
            .as_ref()
            .filter(|_| self.state == MarketState::Finalized)
            .ok_or(MarketError::MarketNotFinalized(self.state))?;
        let position = self
            .positions
            .get(&trader)
            .ok_or_else(|| MarketError::PositionNotFound(trader.clone()))?;

        let payout = book.payout(position);
        let outstanding = position.outstanding(payout);
        if !position.open || outstanding <= Decimal::ZERO {
            return Err(MarketError::AlreadySettled(trader));
        }

        let paid = outstanding.min(self.backing);
        if paid <= Decimal::ZERO {
            warn!("Settlement blocked trader={} backing exhausted", trader);
            return Err(MarketError::InsufficientLiquidity(
                "market backing is exhausted".to_string(),
            ));
        }

        let market_address = self.config.market_address.clone();
        self.ledger.transfer(&market_address, &trader, paid)?;

        let now = self.events.now();
        self.backing -= paid;
        self.total_settled += paid;
        if let Some(position) = self.positions.get_mut(&trader) {
            position.record_settlement(paid, payout, now);
        }

        info!(
            "Position settled trader={} paid={} payout={} backing={}",
            trader, paid, payout, self.backing
        );

        Ok(self.events.append(EventKind::PositionSettled {
            trader,
            payout_delta: paid,
        }))
    }

    /// Pay an LP's share of the residual pool and retire their shares
    pub fn claim_liquidity(&mut self, provider: impl Into<Address>) -> Result<Event> {
        let provider = provider.into();

        let book = self
            .settlement
            .as_ref()
            .filter(|_| self.state == MarketState::Finalized)
            .ok_or(MarketError::MarketNotFinalized(self.state))?;

        let shares = self.lp_shares_of(&provider);
        if shares <= Decimal::ZERO {
            return Err(MarketError::AlreadySettled(provider));
        }
        let amount = book.lp_claim(shares).min(self.backing);

        if amount > Decimal::ZERO {
            let market_address = self.config.market_address.clone();
            self.ledger.transfer(&market_address, &provider, amount)?;
        }

        self.backing -= amount;
        self.total_lp_claimed += amount;
        self.burn_shares(&provider, shares);

        info!(
            "Liquidity claimed provider={} amount={} shares={} backing={}",
            provider, amount, shares, self.backing
        );

        Ok(self.events.append(EventKind::LiquidityRemoved {
            provider,
            amount,
            shares,
        }))
    }

    /// Total owed to `trader` over the position's lifetime
    pub fn payout_of(&self, trader: &Address) -> Result<Amount> {
        let book = self
            .settlement
            .as_ref()
            .ok_or(MarketError::MarketNotFinalized(self.state))?;
        let position = self
            .positions
            .get(trader)
            .ok_or_else(|| MarketError::PositionNotFound(trader.clone()))?;
        Ok(book.payout(position))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn id(&self) -> MarketId {
        self.id
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    pub fn state(&self) -> MarketState {
        self.state
    }

    /// Current market belief, None before initialization
    pub fn distribution(&self) -> Option<Distribution> {
        self.curve.map(|curve| curve.current)
    }

    pub fn k(&self) -> Option<f64> {
        self.curve.map(|curve| curve.pricing.k())
    }

    pub fn backing(&self) -> Amount {
        self.backing
    }

    pub fn final_value(&self) -> Option<f64> {
        self.final_value
    }

    pub fn position(&self, trader: &Address) -> Option<&Position> {
        self.positions.get(trader)
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.positions.values()
    }

    pub fn lp_shares_of(&self, provider: &Address) -> Amount {
        self.lp_shares
            .get(provider)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total_lp_shares(&self) -> Amount {
        self.total_lp_shares
    }

    /// Backing not committed to any position
    pub fn free_liquidity(&self) -> Amount {
        let committed: Amount = self.positions.values().map(Position::exposure).sum();
        (self.backing - committed).max(Decimal::ZERO)
    }

    pub fn settlement(&self) -> Option<&SettlementBook> {
        self.settlement.as_ref()
    }

    /// Σ payout deltas paid to traders so far
    pub fn total_settled(&self) -> Amount {
        self.total_settled
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn snapshot(&self) -> MarketSnapshot {
        let distribution = self.distribution();
        MarketSnapshot {
            id: self.id,
            state: self.state,
            mean: distribution.map(|d| d.mean),
            std_dev: distribution.map(|d| d.std_dev),
            k: self.k(),
            backing: self.backing,
            final_value: self.final_value,
            positions: self.positions.len(),
            open_positions: self.positions.values().filter(|p| p.open).count(),
            total_lp_shares: self.total_lp_shares,
        }
    }

    /// Audit the bookkeeping against the ledger
    pub fn verify_invariants(&self) -> Result<()> {
        let held = self.ledger.balance_of(&self.config.market_address);
        if held != self.backing {
            return Err(MarketError::InvariantViolation(format!(
                "backing {} != ledger balance {}",
                self.backing, held
            )));
        }

        let share_sum: Amount = self.lp_shares.values().copied().sum();
        if share_sum != self.total_lp_shares {
            return Err(MarketError::InvariantViolation(format!(
                "lp shares {} != total {}",
                share_sum, self.total_lp_shares
            )));
        }

        for position in self.positions.values() {
            if position.collateral_committed < Decimal::ZERO || position.credit < Decimal::ZERO {
                return Err(MarketError::InvariantViolation(format!(
                    "position {} has collateral {} credit {}",
                    position.owner, position.collateral_committed, position.credit
                )));
            }
        }
        if self.settlement.is_none() {
            let committed: Amount = self.positions.values().map(Position::exposure).sum();
            if committed > self.backing {
                return Err(MarketError::InvariantViolation(format!(
                    "committed collateral {} exceeds backing {}",
                    committed, self.backing
                )));
            }
        }

        if let Some(book) = &self.settlement {
            let paid = self.total_settled + self.total_lp_claimed;
            if paid > book.backing_at_finalization {
                return Err(MarketError::InvariantViolation(format!(
                    "paid out {} exceeds backing at finalization {}",
                    paid, book.backing_at_finalization
                )));
            }
            if self.total_settled > book.total_payouts {
                return Err(MarketError::InvariantViolation(format!(
                    "settled {} exceeds computed payouts {}",
                    self.total_settled, book.total_payouts
                )));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Internal checks
    // ========================================================================

    fn state_error(&self, operation: &'static str) -> MarketError {
        MarketError::InvalidMarketState {
            operation,
            state: self.state,
        }
    }

    fn check_role(&self, caller: &Address, role: Role) -> Result<()> {
        if self.roles.has_role(caller, role) {
            Ok(())
        } else {
            warn!("Unauthorized caller={} role={:?} market={}", caller, role, self.id);
            Err(MarketError::Unauthorized {
                address: caller.clone(),
                role,
            })
        }
    }

    fn check_trading_role(&self, caller: &Address) -> Result<()> {
        if self.config.restrict_trading_to_users {
            self.check_role(caller, Role::User)?;
        }
        Ok(())
    }

    fn validate_distribution(&self, distribution: &Distribution) -> Result<()> {
        if !distribution.mean.is_finite() || !distribution.std_dev.is_finite() {
            return Err(MarketError::InvalidParameter(format!(
                "mean and std_dev must be finite, got ({}, {})",
                distribution.mean, distribution.std_dev
            )));
        }
        if distribution.std_dev <= 0.0 {
            return Err(MarketError::ZeroLiquidity(format!(
                "std_dev must be positive, got {}",
                distribution.std_dev
            )));
        }
        if distribution.std_dev < self.config.min_std_dev {
            return Err(MarketError::InvalidParameter(format!(
                "std_dev {} below minimum {}",
                distribution.std_dev, self.config.min_std_dev
            )));
        }
        if distribution.std_dev > self.config.max_std_dev {
            return Err(MarketError::InvalidParameter(format!(
                "std_dev {} above maximum {}",
                distribution.std_dev, self.config.max_std_dev
            )));
        }
        Ok(())
    }

    fn check_liquidity_floor(&self, std_dev: f64, k: f64, backing: Amount) -> Result<()> {
        let floor = minimum_std_dev(k, backing);
        if std_dev < floor {
            return Err(MarketError::InvalidParameter(format!(
                "std_dev {} below liquidity floor {} (k={}, backing={})",
                std_dev, floor, k, backing
            )));
        }
        Ok(())
    }

    fn cash_for(&self, trader: &Address, cost: Amount) -> Amount {
        match self.positions.get(trader) {
            Some(position) => position.cash_for(cost),
            None => cost.max(Decimal::ZERO),
        }
    }

    fn validate_amount(&self, amount: Amount) -> Result<()> {
        if is_valid_amount(amount) {
            Ok(())
        } else {
            Err(MarketError::InvalidAmount(amount))
        }
    }

    fn validate_participant(&self, address: &Address) -> Result<()> {
        if *address == self.config.market_address {
            return Err(MarketError::InvalidParameter(format!(
                "{} is the market's own address",
                address
            )));
        }
        Ok(())
    }

    fn ensure_funds(&self, address: &Address, amount: Amount) -> Result<()> {
        let available = self.ledger.balance_of(address);
        if available < amount {
            return Err(MarketError::InsufficientBalance {
                address: address.clone(),
                available,
                requested: amount,
            });
        }
        Ok(())
    }

    fn ensure_backing(&self, amount: Amount) -> Result<()> {
        if self.backing < amount {
            return Err(MarketError::InsufficientLiquidity(format!(
                "backing {} cannot cover {}",
                self.backing, amount
            )));
        }
        Ok(())
    }

    fn burn_shares(&mut self, provider: &Address, shares: Amount) {
        if let Some(held) = self.lp_shares.get_mut(provider) {
            *held -= shares;
            if *held <= Decimal::ZERO {
                self.lp_shares.remove(provider);
            }
        }
        self.total_lp_shares -= shares;
    }
}

impl<L: BalanceStore> fmt::Debug for DistributionMarket<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistributionMarket")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("distribution", &self.distribution())
            .field("backing", &self.backing)
            .field("positions", &self.positions.len())
            .field("ledger", &self.ledger.name())
            .finish()
    }
}
