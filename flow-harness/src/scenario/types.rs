//! Scenario types for campaign workflow testing

use std::path::PathBuf;

use flow_core::{AgentKind, CampaignInput, FlowConfig, SharedRandom, Supervisor};
use serde::{Deserialize, Serialize};

/// A parsed scenario from a scenario directory
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario name (directory name)
    pub name: String,
    pub path: PathBuf,
    pub config: ScenarioConfig,
    pub campaign: CampaignInput,
    pub expected: ExpectedState,
}

/// Fixed random value for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRoll {
    pub agent: AgentKind,
    pub roll: f64,
}

/// Supervisor set-up from scenario.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Seed for every agent without a fixed roll
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Every roll returns this value; overrides `seed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant_roll: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agent_rolls: Vec<AgentRoll>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outreach_success_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_success_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_agents: Vec<AgentKind>,
}

impl ScenarioConfig {
    /// Orchestration config for this scenario. Simulated delays are always off.
    pub fn flow_config(&self) -> anyhow::Result<FlowConfig> {
        let defaults = FlowConfig::default();
        FlowConfig {
            seed: self.seed,
            latency_scale: 0.0,
            outreach_success_rate: self
                .outreach_success_rate
                .unwrap_or(defaults.outreach_success_rate),
            payment_success_rate: self
                .payment_success_rate
                .unwrap_or(defaults.payment_success_rate),
            ..defaults
        }
        .validated()
    }

    pub fn build_supervisor(&self) -> anyhow::Result<Supervisor> {
        let mut builder = Supervisor::builder(self.flow_config()?);
        if let Some(value) = self.constant_roll {
            builder = builder.random(SharedRandom::constant(value));
        }
        for fixed in &self.agent_rolls {
            builder = builder.agent_random(fixed.agent, SharedRandom::constant(fixed.roll));
        }
        for kind in &self.disabled_agents {
            builder = builder.without(*kind);
        }
        Ok(builder.build()?)
    }
}

/// Expected state from expected.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedState {
    /// Schema version for forward compatibility
    pub schema_version: u32,
    pub assertions: Assertions,
}

/// Assertions about the campaign after the workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assertions {
    /// Expected campaign status (active, completed or failed)
    pub final_status: String,
    /// Stage names in recorded order
    pub workflow_steps: Vec<String>,
    /// Text the campaign error must contain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_contains: Option<String>,
    /// Size of the completed-task log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_completed: Option<usize>,
}
