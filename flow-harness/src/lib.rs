//! flow-harness library
//!
//! Scenario runner and launcher for InfluencerFlow campaign workflows.

pub mod commands;
pub mod failure;
pub mod scenario;

pub use failure::{CategorizedFailure, FailureCategory};
pub use scenario::{load_scenario, Assertions, ExpectedState, Scenario, ScenarioConfig};
