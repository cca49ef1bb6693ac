//! Market lifecycle integration tests
//!
//! Walks a market through its whole life:
//! 1. LP seeds the market, traders move the belief
//! 2. Admin pauses / resumes
//! 3. Oracle finalizes the outcome
//! 4. Traders claim settlement, LPs claim the residual
//!
//! Every step checks the ledger, the backing and the event log together.

use std::sync::Arc;

use distmarket_access::RoleTable;
use distmarket_clock::ManualClock;
use distmarket_core::{Address, Amount, EventKind, MarketState, Role};
use distmarket_ledger::{BalanceStore, EventLog, Ledger};
use distribution_market::{DistributionMarket, MarketConfig, MarketError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn addr(name: &str) -> Address {
    Address::from(name)
}

struct Fixture {
    market: DistributionMarket,
    supply: Amount,
}

/// Funded ledger, admin + oracle roles, market not yet initialized
fn fixture() -> Fixture {
    let _ = env_logger::try_init();

    let clock = Arc::new(ManualClock::starting_at_epoch());
    let events = EventLog::new(clock);
    let mut ledger = Ledger::new(events.clone());
    for (who, amount) in [
        ("lp_1", dec!(1000)),
        ("lp_2", dec!(400)),
        ("trader_1", dec!(500)),
        ("trader_2", dec!(500)),
    ] {
        ledger.mint(&addr(who), amount).unwrap();
    }
    let supply = ledger.total_supply();

    let roles = Arc::new(
        RoleTable::new()
            .with_role("admin", Role::Admin)
            .with_role("oracle", Role::Oracle),
    );
    let market = DistributionMarket::new(MarketConfig::default(), ledger, roles, events);
    Fixture { market, supply }
}

fn seeded() -> Fixture {
    let mut fx = fixture();
    fx.market
        .initialize_market(100.0, 10.0, dec!(1000), 1.0, "lp_1")
        .unwrap();
    fx
}

fn trade_cost(kind: &EventKind) -> Amount {
    match kind {
        EventKind::Trade { cost, .. } => *cost,
        other => panic!("expected Trade, got {:?}", other),
    }
}

fn settled_delta(kind: &EventKind) -> Amount {
    match kind {
        EventKind::PositionSettled { payout_delta, .. } => *payout_delta,
        other => panic!("expected PositionSettled, got {:?}", other),
    }
}

fn assert_conserved(fx: &Fixture) {
    assert_eq!(fx.market.ledger().total_supply(), fx.supply);
    assert!(fx.market.ledger().check_conservation());
    fx.market.verify_invariants().unwrap();
}

#[test]
fn test_initialize_moves_backing_into_market() {
    let mut fx = fixture();
    let event = fx
        .market
        .initialize_market(100.0, 10.0, dec!(1000), 1.0, "lp_1")
        .unwrap();

    assert_eq!(
        event.kind,
        EventKind::MarketInitialized {
            mean: 100.0,
            std_dev: 10.0,
            backing: dec!(1000),
            k: 1.0,
            lp_address: addr("lp_1"),
        }
    );
    assert_eq!(fx.market.state(), MarketState::Active);
    assert_eq!(fx.market.backing(), dec!(1000));
    assert_eq!(fx.market.ledger().balance_of(&addr("lp_1")), dec!(0));
    assert_eq!(fx.market.ledger().balance_of(&addr("market")), dec!(1000));
    assert_conserved(&fx);
}

#[test]
fn test_scenario_trade_within_slippage() {
    let mut fx = seeded();
    let before_trader = fx.market.ledger().balance_of(&addr("trader_1"));
    let before_backing = fx.market.backing();

    let event = fx
        .market
        .trade(105.0, 8.0, "trader_1", dec!(100.0))
        .unwrap();
    let cost = trade_cost(&event.kind);

    assert!(cost > dec!(0));
    assert!(cost <= dec!(100.0));
    assert_eq!(
        event.kind,
        EventKind::Trade {
            trader: addr("trader_1"),
            new_mean: 105.0,
            new_std_dev: 8.0,
            cost,
        }
    );
    assert_eq!(
        fx.market.ledger().balance_of(&addr("trader_1")),
        before_trader - cost
    );
    assert_eq!(fx.market.backing(), before_backing + cost);

    let position = fx.market.position(&addr("trader_1")).unwrap();
    assert_eq!(position.collateral_committed, cost);
    assert_eq!((position.mean, position.std_dev), (105.0, 8.0));
    assert!(position.open);
    assert_conserved(&fx);
}

#[test]
fn test_scenario_trade_while_paused() {
    let mut fx = seeded();
    fx.market.pause(&addr("admin")).unwrap();

    let events_before = fx.market.events().len();
    let balance_before = fx.market.ledger().balance_of(&addr("trader_1"));

    let err = fx
        .market
        .trade(105.0, 8.0, "trader_1", dec!(100))
        .unwrap_err();

    assert_eq!(
        err,
        MarketError::InvalidMarketState {
            operation: "trade",
            state: MarketState::Paused,
        }
    );
    assert_eq!(fx.market.events().len(), events_before);
    assert_eq!(
        fx.market.ledger().balance_of(&addr("trader_1")),
        balance_before
    );
    assert!(fx.market.position(&addr("trader_1")).is_none());
    assert_conserved(&fx);
}

#[test]
fn test_scenario_finalize_and_claim() {
    let mut fx = seeded();
    let cost = trade_cost(
        &fx.market
            .trade(105.0, 8.0, "trader_1", dec!(100))
            .unwrap()
            .kind,
    );

    let finalized = fx.market.finalize_market(102.0, &addr("oracle")).unwrap();
    assert_eq!(
        finalized.kind,
        EventKind::MarketFinalized { final_value: 102.0 }
    );

    let backing_before = fx.market.backing();
    let claim = fx.market.claim_settlement("trader_1").unwrap();
    let payout = settled_delta(&claim.kind);

    assert!(payout > dec!(0));
    assert!(payout <= cost);
    assert!(payout <= backing_before);
    assert_eq!(fx.market.backing(), backing_before - payout);
    assert_eq!(
        fx.market.ledger().balance_of(&addr("trader_1")),
        dec!(500) - cost + payout
    );

    let position = fx.market.position(&addr("trader_1")).unwrap();
    assert_eq!(position.settled_amount, payout);
    assert!(!position.open);
    assert_conserved(&fx);
}

#[test]
fn test_second_claim_is_already_settled() {
    let mut fx = seeded();
    fx.market.trade(105.0, 8.0, "trader_1", dec!(100)).unwrap();
    fx.market.finalize_market(102.0, &addr("oracle")).unwrap();

    fx.market.claim_settlement("trader_1").unwrap();
    let events_after_first = fx.market.events().len();

    let err = fx.market.claim_settlement("trader_1").unwrap_err();
    assert_eq!(err, MarketError::AlreadySettled(addr("trader_1")));
    assert_eq!(fx.market.events().len(), events_after_first);
}

#[test]
fn test_claim_before_finalization() {
    let mut fx = seeded();
    fx.market.trade(105.0, 8.0, "trader_1", dec!(100)).unwrap();

    assert_eq!(
        fx.market.claim_settlement("trader_1").unwrap_err(),
        MarketError::MarketNotFinalized(MarketState::Active)
    );

    fx.market.pause(&addr("admin")).unwrap();
    assert_eq!(
        fx.market.claim_settlement("trader_1").unwrap_err(),
        MarketError::MarketNotFinalized(MarketState::Paused)
    );
    assert!(matches!(
        fx.market.claim_liquidity("lp_1"),
        Err(MarketError::MarketNotFinalized(_))
    ));
}

#[test]
fn test_claim_without_position() {
    let mut fx = seeded();
    fx.market.finalize_market(100.0, &addr("oracle")).unwrap();
    assert_eq!(
        fx.market.claim_settlement("stranger").unwrap_err(),
        MarketError::PositionNotFound(addr("stranger"))
    );
}

#[test]
fn test_state_machine_legality() {
    let mut fx = seeded();
    let admin = addr("admin");
    let oracle = addr("oracle");

    // Only the matching source state is accepted
    assert!(matches!(
        fx.market.unpause(&admin),
        Err(MarketError::InvalidMarketState { .. })
    ));
    fx.market.pause(&admin).unwrap();
    assert!(matches!(
        fx.market.pause(&admin),
        Err(MarketError::InvalidMarketState { .. })
    ));
    assert!(matches!(
        fx.market.add_liquidity(dec!(10), "lp_2"),
        Err(MarketError::InvalidMarketState { .. })
    ));
    fx.market.unpause(&admin).unwrap();
    assert_eq!(fx.market.state(), MarketState::Active);

    // Finalize from Paused is allowed
    fx.market.pause(&admin).unwrap();
    fx.market.finalize_market(101.0, &oracle).unwrap();
    assert_eq!(fx.market.state(), MarketState::Finalized);

    // Finalized is terminal
    assert!(matches!(
        fx.market.finalize_market(99.0, &oracle),
        Err(MarketError::InvalidMarketState { .. })
    ));
    assert!(matches!(
        fx.market.trade(105.0, 8.0, "trader_1", dec!(100)),
        Err(MarketError::InvalidMarketState { .. })
    ));
    assert!(matches!(
        fx.market.pause(&admin),
        Err(MarketError::InvalidMarketState { .. })
    ));
    assert_eq!(fx.market.final_value(), Some(101.0));

    let names: Vec<&str> = fx
        .market
        .events()
        .events_since(0)
        .iter()
        .map(|e| e.name())
        .filter(|name| *name != "Transfer")
        .collect();
    assert_eq!(
        names,
        vec![
            "MarketInitialized",
            "MarketPaused",
            "MarketResumed",
            "MarketPaused",
            "MarketFinalized",
        ]
    );
}

#[test]
fn test_unauthorized_callers_leave_no_trace() {
    let mut fx = seeded();
    let events_before = fx.market.events().len();

    assert_eq!(
        fx.market.pause(&addr("trader_1")).unwrap_err(),
        MarketError::Unauthorized {
            address: addr("trader_1"),
            role: Role::Admin,
        }
    );
    // Admin is not an oracle
    assert_eq!(
        fx.market.finalize_market(102.0, &addr("admin")).unwrap_err(),
        MarketError::Unauthorized {
            address: addr("admin"),
            role: Role::Oracle,
        }
    );
    // Role check comes before the state check
    fx.market.pause(&addr("admin")).unwrap();
    assert!(matches!(
        fx.market.unpause(&addr("oracle")),
        Err(MarketError::Unauthorized { .. })
    ));

    assert_eq!(fx.market.events().len(), events_before + 1);
    assert_eq!(fx.market.state(), MarketState::Paused);
}

#[test]
fn test_slippage_guard_leaves_state_unchanged() {
    let mut fx = seeded();
    let quote = fx.market.quote_trade(110.0, 5.0).unwrap();
    let events_before = fx.market.events().len();

    let err = fx
        .market
        .trade(110.0, 5.0, "trader_1", quote - dec!(0.00000001))
        .unwrap_err();
    assert_eq!(
        err,
        MarketError::SlippageExceeded {
            cost: quote,
            max_collateral: quote - dec!(0.00000001),
        }
    );

    assert_eq!(fx.market.events().len(), events_before);
    assert_eq!(fx.market.backing(), dec!(1000));
    assert_eq!(
        fx.market.distribution().map(|d| (d.mean, d.std_dev)),
        Some((100.0, 10.0))
    );
    assert!(fx.market.position(&addr("trader_1")).is_none());

    // Exactly at the quote is accepted
    fx.market.trade(110.0, 5.0, "trader_1", quote).unwrap();
}

#[test]
fn test_trade_rejects_invalid_distribution() {
    let mut fx = seeded();
    assert!(matches!(
        fx.market.trade(105.0, 0.0, "trader_1", dec!(100)),
        Err(MarketError::ZeroLiquidity(_))
    ));
    assert!(matches!(
        fx.market.trade(105.0, -2.0, "trader_1", dec!(100)),
        Err(MarketError::ZeroLiquidity(_))
    ));
    assert!(matches!(
        fx.market.trade(f64::INFINITY, 8.0, "trader_1", dec!(100)),
        Err(MarketError::InvalidParameter(_))
    ));
    assert!(matches!(
        fx.market.trade(105.0, 8.0, "market", dec!(100)),
        Err(MarketError::InvalidParameter(_))
    ));
}

#[test]
fn test_trade_requires_funds() {
    let mut fx = seeded();
    let quote = fx.market.quote_trade(160.0, 1.0).unwrap();
    assert!(quote > dec!(500));

    let err = fx
        .market
        .trade(160.0, 1.0, "trader_1", dec!(10000))
        .unwrap_err();
    assert!(matches!(err, MarketError::InsufficientBalance { .. }));
    assert_conserved(&fx);
}

#[test]
fn test_round_trip_costs_nothing() {
    let mut fx = seeded();
    let there = trade_cost(
        &fx.market
            .trade(108.0, 7.0, "trader_1", dec!(500))
            .unwrap()
            .kind,
    );
    let back = trade_cost(
        &fx.market
            .trade(100.0, 10.0, "trader_1", dec!(0))
            .unwrap()
            .kind,
    );

    assert_eq!(there + back, dec!(0));
    assert_eq!(
        fx.market.ledger().balance_of(&addr("trader_1")),
        dec!(500)
    );
    assert_eq!(fx.market.backing(), dec!(1000));
    let position = fx.market.position(&addr("trader_1")).unwrap();
    assert_eq!(position.collateral_committed, dec!(0));
    assert_eq!(position.trade_count, 2);
}

#[test]
fn test_undoing_another_traders_move_is_not_profitable() {
    let mut fx = seeded();
    let pair = [addr("trader_1"), addr("trader_2")];
    let combined = |fx: &Fixture| -> Amount {
        pair.iter().map(|a| fx.market.ledger().balance_of(a)).sum()
    };
    let start = combined(&fx);

    let paid = trade_cost(
        &fx.market
            .trade(105.0, 8.0, "trader_1", dec!(100))
            .unwrap()
            .kind,
    );
    assert!(paid > dec!(0));

    // trader_2 puts the belief back; none of trader_1's collateral leaves
    let undone = trade_cost(
        &fx.market
            .trade(100.0, 10.0, "trader_2", dec!(0))
            .unwrap()
            .kind,
    );
    assert_eq!(undone, dec!(0));
    assert_eq!(fx.market.backing(), dec!(1000) + paid);
    assert_conserved(&fx);

    fx.market.finalize_market(100.0, &addr("oracle")).unwrap();
    let payout = settled_delta(&fx.market.claim_settlement("trader_1").unwrap().kind);
    assert!(payout <= paid);
    assert!(matches!(
        fx.market.claim_settlement("trader_2"),
        Err(MarketError::AlreadySettled(_))
    ));

    assert!(combined(&fx) <= start);
    assert_conserved(&fx);
}

#[test]
fn test_refund_after_own_move_then_settle() {
    let mut fx = seeded();
    let paid = trade_cost(
        &fx.market
            .trade(108.0, 7.0, "trader_1", dec!(500))
            .unwrap()
            .kind,
    );
    let refunded = trade_cost(
        &fx.market
            .trade(103.0, 9.0, "trader_1", dec!(0))
            .unwrap()
            .kind,
    );
    assert!(refunded < dec!(0));

    let position = fx.market.position(&addr("trader_1")).cloned().unwrap();
    assert_eq!(position.collateral_committed, paid + refunded);

    fx.market.finalize_market(103.0, &addr("oracle")).unwrap();
    let payout = settled_delta(&fx.market.claim_settlement("trader_1").unwrap().kind);

    // Exactly on the committed mean the score is 1
    assert_eq!(payout, position.collateral_committed);
    assert_eq!(
        fx.market.ledger().balance_of(&addr("trader_1")),
        dec!(500)
    );
    assert_conserved(&fx);
}

#[test]
fn test_full_lifecycle_with_liquidity() {
    let mut fx = seeded();
    let admin = addr("admin");

    // === Trading ===
    fx.market.trade(105.0, 8.0, "trader_1", dec!(100)).unwrap();
    fx.market.add_liquidity(dec!(400), "lp_2").unwrap();
    fx.market.trade(95.0, 12.0, "trader_2", dec!(200)).unwrap();
    fx.market.pause(&admin).unwrap();
    fx.market.unpause(&admin).unwrap();
    fx.market.trade(99.0, 9.0, "trader_1", dec!(200)).unwrap();
    assert_conserved(&fx);

    // === Finalization ===
    fx.market.finalize_market(98.0, &addr("oracle")).unwrap();
    let book = fx.market.settlement().cloned().unwrap();
    assert_eq!(book.backing_at_finalization, fx.market.backing());

    // === Settlement ===
    let mut paid = Decimal::ZERO;
    for trader in ["trader_1", "trader_2", "lp_1"] {
        match fx.market.claim_settlement(trader) {
            Ok(event) => paid += settled_delta(&event.kind),
            Err(MarketError::AlreadySettled(_)) => {}
            Err(other) => panic!("unexpected error {:?}", other),
        }
        assert_conserved(&fx);
    }
    assert_eq!(paid, fx.market.total_settled());
    assert!(paid <= book.backing_at_finalization);

    for provider in ["lp_1", "lp_2"] {
        let event = fx.market.claim_liquidity(provider).unwrap();
        assert!(matches!(event.kind, EventKind::LiquidityRemoved { .. }));
        assert_eq!(fx.market.lp_shares_of(&addr(provider)), dec!(0));
        assert_conserved(&fx);
    }
    assert!(matches!(
        fx.market.claim_liquidity("lp_1"),
        Err(MarketError::AlreadySettled(_))
    ));

    // Only rounding dust may remain
    assert!(fx.market.backing() >= dec!(0));
    assert!(fx.market.backing() < dec!(0.0001));
    assert_eq!(fx.market.total_lp_shares(), dec!(0));
}

#[test]
fn test_event_log_is_ordered() {
    let mut fx = seeded();
    fx.market.trade(105.0, 8.0, "trader_1", dec!(100)).unwrap();
    fx.market.finalize_market(102.0, &addr("oracle")).unwrap();
    fx.market.claim_settlement("trader_1").unwrap();

    let events = fx.market.events().events_since(0);
    for (index, event) in events.iter().enumerate() {
        assert_eq!(event.sequence, index as u64);
    }
    for pair in events.windows(2) {
        assert!(pair[1].timestamp >= pair[0].timestamp);
    }

    // Four mints, then initialize (transfer + event), trade (transfer + event) ...
    assert_eq!(fx.market.events().events_named("Trade").len(), 1);
    assert_eq!(fx.market.events().events_named("PositionSettled").len(), 1);
    assert_eq!(fx.market.events().events_named("Transfer").len(), 7);
}
