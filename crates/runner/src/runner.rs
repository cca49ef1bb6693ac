//! Scenario execution and reporting

use std::collections::BTreeMap;

use distmarket_core::{Address, Amount, Event};
use distmarket_ledger::BalanceStore;
use distribution_market::{MarketSnapshot, Result as MarketResult};
use log::{info, warn};
use serde::Serialize;

use crate::bootstrap::SimulationBootstrap;
use crate::scenario::{ScenarioConfig, ScenarioError, Step};

/// Result of a single step
#[derive(Debug, Clone, Serialize)]
pub struct StepOutcome {
    pub index: usize,
    pub action: &'static str,
    /// Event emitted by the step, if any
    pub event: Option<Event>,
    /// Quoted cost for `quote` steps
    pub quote: Option<Amount>,
    pub error: Option<String>,
}

impl StepOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Final state of a scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub market: MarketSnapshot,
    pub outcomes: Vec<StepOutcome>,
    pub balances: BTreeMap<Address, Amount>,
    pub total_supply: Amount,
    pub event_count: usize,
    pub invariants_hold: bool,
}

impl ScenarioReport {
    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }
}

/// Executes the steps of a scenario against a bootstrapped market
pub struct ScenarioRunner {
    config: ScenarioConfig,
    boot: SimulationBootstrap,
}

impl ScenarioRunner {
    pub fn new(config: ScenarioConfig) -> Result<Self, ScenarioError> {
        let boot = SimulationBootstrap::from_config(&config)?;
        Ok(Self { config, boot })
    }

    pub fn with_bootstrap(config: ScenarioConfig, boot: SimulationBootstrap) -> Self {
        Self { config, boot }
    }

    /// Run every step and build the report
    pub fn run(mut self) -> Result<ScenarioReport, ScenarioError> {
        info!(
            "Running scenario={} steps={}",
            self.config.name,
            self.config.steps.len()
        );

        let steps = std::mem::take(&mut self.config.steps);
        let mut outcomes = Vec::with_capacity(steps.len());

        for (index, step) in steps.iter().enumerate() {
            let outcome = self.execute(index, step);
            if let Some(reason) = &outcome.error {
                warn!("Step failed index={} action={} error={}", index, step.name(), reason);
                if self.config.stop_on_error {
                    return Err(ScenarioError::StepFailed {
                        index,
                        action: step.name(),
                        reason: reason.clone(),
                    });
                }
            }
            outcomes.push(outcome);
        }

        Ok(self.report(outcomes))
    }

    fn execute(&mut self, index: usize, step: &Step) -> StepOutcome {
        let market = &mut self.boot.market;
        let mut quote = None;

        let result: MarketResult<Option<Event>> = match step {
            Step::Trade {
                trader,
                mean,
                std_dev,
                max_collateral,
            } => market
                .trade(*mean, *std_dev, trader, *max_collateral)
                .map(Some),
            Step::Quote { mean, std_dev } => market.quote_trade(*mean, *std_dev).map(|cost| {
                quote = Some(cost);
                None
            }),
            Step::Pause { caller } => market.pause(caller).map(Some),
            Step::Unpause { caller } => market.unpause(caller).map(Some),
            Step::Finalize { caller, value } => market.finalize_market(*value, caller).map(Some),
            Step::ResolveOracle { value } => {
                self.boot.oracle.resolve(*value);
                Ok(None)
            }
            Step::FinalizeFromOracle { caller } => market
                .finalize_from_oracle(self.boot.oracle.as_ref(), caller)
                .map(Some),
            Step::Claim { trader } => market.claim_settlement(trader).map(Some),
            Step::AddLiquidity { provider, amount } => {
                market.add_liquidity(*amount, provider).map(Some)
            }
            Step::RemoveLiquidity { provider, shares } => {
                market.remove_liquidity(*shares, provider).map(Some)
            }
            Step::ClaimLiquidity { provider } => market.claim_liquidity(provider).map(Some),
        };

        match result {
            Ok(event) => StepOutcome {
                index,
                action: step.name(),
                event,
                quote,
                error: None,
            },
            Err(err) => StepOutcome {
                index,
                action: step.name(),
                event: None,
                quote: None,
                error: Some(err.to_string()),
            },
        }
    }

    fn report(self, outcomes: Vec<StepOutcome>) -> ScenarioReport {
        let market = &self.boot.market;
        let ledger = market.ledger();

        let balances = ledger
            .holders()
            .map(|(address, balance)| (address.clone(), *balance))
            .collect();
        let invariants_hold = ledger.check_conservation() && market.verify_invariants().is_ok();

        info!(
            "Scenario finished name={} state={} backing={} invariants_hold={}",
            self.config.name,
            market.state(),
            market.backing(),
            invariants_hold
        );

        ScenarioReport {
            name: self.config.name.clone(),
            market: market.snapshot(),
            outcomes,
            balances,
            total_supply: ledger.total_supply(),
            event_count: market.events().len(),
            invariants_hold,
        }
    }
}
