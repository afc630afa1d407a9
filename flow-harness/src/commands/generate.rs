//! Scenario generator command
//!
//! Writes a scenario directory for one of the reference workflow outcomes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use flow_core::campaign::TargetCriteria;
use flow_core::{AgentKind, CampaignInput, WorkflowStage};
use serde::Serialize;

use crate::scenario::{AgentRoll, Assertions, ExpectedState, ScenarioConfig};

/// Reference outcome a generated scenario reproduces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioOutcome {
    /// Every send and charge succeeds; all six stages run
    Completed,
    /// Every outreach send fails; contract and payment are skipped
    NoResponses,
    /// The discovery agent is not registered; the campaign fails
    MissingDiscovery,
}

impl std::str::FromStr for ScenarioOutcome {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "completed" => Ok(ScenarioOutcome::Completed),
            "no-responses" => Ok(ScenarioOutcome::NoResponses),
            "missing-discovery" => Ok(ScenarioOutcome::MissingDiscovery),
            other => bail!(
                "Invalid outcome '{}'. Valid values: completed, no-responses, missing-discovery",
                other
            ),
        }
    }
}

/// Configuration for scenario generation
pub struct GenerateConfig {
    pub outcome: ScenarioOutcome,
    /// Campaign budget written to campaign.json
    pub budget: f64,
    /// Output directory for the scenario
    pub output_dir: PathBuf,
}

pub fn generate(config: &GenerateConfig) -> Result<()> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    write_json(&config.output_dir, "scenario.json", &scenario_config(config.outcome))?;
    write_json(&config.output_dir, "campaign.json", &campaign_input(config.budget))?;
    write_json(&config.output_dir, "expected.json", &expected_state(config.outcome))?;
    Ok(())
}

fn write_json<T: Serialize>(dir: &Path, file: &str, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(dir.join(file), content + "\n").with_context(|| format!("Failed to write {}", file))
}

fn scenario_config(outcome: ScenarioOutcome) -> ScenarioConfig {
    let base = ScenarioConfig {
        constant_roll: Some(0.0),
        ..ScenarioConfig::default()
    };
    match outcome {
        ScenarioOutcome::Completed => ScenarioConfig {
            description: Some("All sends and charges succeed".to_string()),
            ..base
        },
        ScenarioOutcome::NoResponses => ScenarioConfig {
            description: Some("Every outreach send fails".to_string()),
            agent_rolls: vec![AgentRoll {
                agent: AgentKind::Outreach,
                roll: 0.99,
            }],
            ..base
        },
        ScenarioOutcome::MissingDiscovery => ScenarioConfig {
            description: Some("No discovery agent registered".to_string()),
            disabled_agents: vec![AgentKind::Discovery],
            ..base
        },
    }
}

fn campaign_input(budget: f64) -> CampaignInput {
    CampaignInput {
        title: "Generated Campaign".to_string(),
        brand: "Generated Brand".to_string(),
        budget,
        target_criteria: TargetCriteria {
            niche: Some("Tech".to_string()),
            platform: Some("youtube".to_string()),
            min_followers: Some(1000),
        },
        deliverables: "1 post".to_string(),
        timeline: "1 week".to_string(),
    }
}

fn expected_state(outcome: ScenarioOutcome) -> ExpectedState {
    let stages: &[WorkflowStage] = match outcome {
        ScenarioOutcome::Completed => &[
            WorkflowStage::Discovery,
            WorkflowStage::Outreach,
            WorkflowStage::Contract,
            WorkflowStage::Payment,
            WorkflowStage::Analytics,
            WorkflowStage::Crm,
        ],
        ScenarioOutcome::NoResponses => &[
            WorkflowStage::Discovery,
            WorkflowStage::Outreach,
            WorkflowStage::Analytics,
            WorkflowStage::Crm,
        ],
        ScenarioOutcome::MissingDiscovery => &[],
    };
    let (final_status, error_contains) = match outcome {
        ScenarioOutcome::MissingDiscovery => (
            "failed",
            Some("No agent available for task: DISCOVER_CREATORS".to_string()),
        ),
        _ => ("completed", None),
    };

    ExpectedState {
        schema_version: 1,
        assertions: Assertions {
            final_status: final_status.to_string(),
            workflow_steps: stages.iter().map(|s| s.to_string()).collect(),
            error_contains,
            tasks_completed: Some(stages.len()),
        },
    }
}
