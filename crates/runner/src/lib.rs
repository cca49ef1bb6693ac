//! Distribution Market Runner
//!
//! Replays a scripted scenario against a single market:
//!
//! - **Scenario**: JSON description of accounts, roles, the market seed and
//!   an ordered list of steps
//! - **Bootstrap**: funds the ledger, grants roles, builds the market
//! - **Runner**: executes every step, records each outcome and produces a
//!   report with final balances and an invariant check
//!
//! ```text
//!  scenario.json ──► ScenarioConfig ──► SimulationBootstrap
//!                                            │ Ledger (funded)
//!                                            │ RoleTable (granted)
//!                                            ▼
//!                                    DistributionMarket
//!                                            │ steps
//!                                            ▼
//!                                      ScenarioRunner ──► ScenarioReport
//! ```

pub mod bootstrap;
pub mod runner;
pub mod scenario;

// Re-export main types
pub use bootstrap::SimulationBootstrap;
pub use runner::{ScenarioReport, ScenarioRunner, StepOutcome};
pub use scenario::{AccountConfig, ScenarioConfig, ScenarioError, SeedConfig, Step};
