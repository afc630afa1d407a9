//! Scenario loading and types
//!
//! A scenario directory holds `scenario.json` (supervisor set-up),
//! `campaign.json` (the campaign input) and `expected.json` (assertions).

mod loader;
mod types;

pub use loader::load_scenario;
pub use types::{AgentRoll, Assertions, ExpectedState, Scenario, ScenarioConfig};
