//! Run command implementation
//!
//! Executes a scenario against an in-process supervisor and checks the
//! resulting campaign.

use std::path::PathBuf;

use anyhow::{Context, Result};
use flow_core::{Campaign, CampaignStatus, Supervisor};
use tracing::info;

use crate::failure::CategorizedFailure;
use crate::scenario::{load_scenario, ExpectedState};

/// Result of running a scenario
#[derive(Debug)]
pub struct RunResult {
    pub scenario_name: String,
    pub passed: bool,
    /// List of failures (empty if passed)
    pub failures: Vec<CategorizedFailure>,
    /// Campaign id, when the campaign was admitted
    pub campaign_id: Option<String>,
}

impl RunResult {
    fn success(scenario_name: String, campaign_id: Option<String>) -> Self {
        Self {
            scenario_name,
            passed: true,
            failures: vec![],
            campaign_id,
        }
    }

    fn failure(
        scenario_name: String,
        campaign_id: Option<String>,
        failures: Vec<CategorizedFailure>,
    ) -> Self {
        Self {
            scenario_name,
            passed: false,
            failures,
            campaign_id,
        }
    }
}

/// Configuration for the run command
pub struct RunConfig {
    /// Path to scenarios directory
    pub scenarios_dir: PathBuf,
}

/// What the supervisor ended up with after one campaign.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedOutcome {
    pub status: String,
    pub stages: Vec<String>,
    pub error: Option<String>,
    pub tasks_completed: usize,
}

impl ObservedOutcome {
    pub fn from_campaign(campaign: &Campaign, supervisor: &Supervisor) -> Self {
        Self {
            status: campaign.status.to_string(),
            stages: campaign.stages().iter().map(|s| s.to_string()).collect(),
            error: campaign.error.clone(),
            tasks_completed: supervisor.completed_tasks().len(),
        }
    }
}

pub async fn run(scenario_name: &str, config: &RunConfig) -> Result<RunResult> {
    let scenario_dir = config.scenarios_dir.join(scenario_name);
    let scenario = load_scenario(&scenario_dir)
        .with_context(|| format!("Failed to load scenario: {}", scenario_name))?;

    let mut supervisor = match scenario.config.build_supervisor() {
        Ok(supervisor) => supervisor,
        Err(e) => {
            return Ok(RunResult::failure(
                scenario.name,
                None,
                vec![CategorizedFailure::setup_failed(format!("{:#}", e))],
            ));
        }
    };

    // The campaign outcome is checked through the recorded campaign, so the
    // returned error only matters for rejected input.
    if let Err(e) = supervisor.create_campaign(scenario.campaign.clone()).await {
        info!(scenario = %scenario.name, error = %e, "campaign returned an error");
    }

    let Some(campaign) = supervisor.campaigns().last() else {
        return Ok(RunResult::failure(
            scenario.name,
            None,
            vec![CategorizedFailure::setup_failed(
                "campaign input was rejected before admission",
            )],
        ));
    };

    let observed = ObservedOutcome::from_campaign(campaign, &supervisor);
    let campaign_id = Some(campaign.id.clone());
    let failures = validate_outcome(&scenario.expected, &observed);

    if failures.is_empty() {
        Ok(RunResult::success(scenario.name, campaign_id))
    } else {
        Ok(RunResult::failure(scenario.name, campaign_id, failures))
    }
}

pub fn validate_outcome(
    expected: &ExpectedState,
    observed: &ObservedOutcome,
) -> Vec<CategorizedFailure> {
    let mut failures = Vec::new();
    let assertions = &expected.assertions;

    if observed.stages != assertions.workflow_steps {
        failures.push(CategorizedFailure::stage_mismatch(
            &assertions.workflow_steps,
            &observed.stages,
        ));
    }

    match assertions.final_status.parse::<CampaignStatus>() {
        Ok(status) if status.to_string() == observed.status => {}
        _ => failures.push(CategorizedFailure::status_mismatch(
            &assertions.final_status,
            &observed.status,
        )),
    }

    if let Some(ref expected_error) = assertions.error_contains {
        let matches = observed
            .error
            .as_deref()
            .is_some_and(|e| e.contains(expected_error.as_str()));
        if !matches {
            failures.push(CategorizedFailure::error_mismatch(
                expected_error,
                observed.error.as_deref(),
            ));
        }
    }

    if let Some(expected_tasks) = assertions.tasks_completed {
        if expected_tasks != observed.tasks_completed {
            failures.push(CategorizedFailure::task_count_mismatch(
                expected_tasks,
                observed.tasks_completed,
            ));
        }
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::FailureCategory;
    use crate::scenario::Assertions;

    fn expected(status: &str, steps: &[&str], error: Option<&str>) -> ExpectedState {
        ExpectedState {
            schema_version: 1,
            assertions: Assertions {
                final_status: status.to_string(),
                workflow_steps: steps.iter().map(|s| s.to_string()).collect(),
                error_contains: error.map(|e| e.to_string()),
                tasks_completed: None,
            },
        }
    }

    fn observed(status: &str, steps: &[&str], error: Option<&str>) -> ObservedOutcome {
        ObservedOutcome {
            status: status.to_string(),
            stages: steps.iter().map(|s| s.to_string()).collect(),
            error: error.map(|e| e.to_string()),
            tasks_completed: steps.len(),
        }
    }

    #[test]
    fn test_validate_outcome_passes() {
        let steps = ["discovery", "outreach", "analytics", "crm"];
        let failures = validate_outcome(
            &expected("completed", &steps, None),
            &observed("completed", &steps, None),
        );
        assert!(failures.is_empty());
    }

    #[test]
    fn test_validate_outcome_stage_mismatch() {
        let failures = validate_outcome(
            &expected("completed", &["discovery", "outreach"], None),
            &observed("completed", &["discovery"], None),
        );
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].category, FailureCategory::Workflow);
    }

    #[test]
    fn test_validate_outcome_status_and_error() {
        let failures = validate_outcome(
            &expected("failed", &[], Some("DISCOVER_CREATORS")),
            &observed("completed", &[], None),
        );
        assert_eq!(failures.len(), 2);
        assert!(failures
            .iter()
            .all(|f| f.category == FailureCategory::Outcome));
    }

    #[test]
    fn test_validate_outcome_unknown_status_never_matches() {
        let failures = validate_outcome(
            &expected("paused", &[], None),
            &observed("paused", &[], None),
        );
        assert_eq!(failures.len(), 1);
    }

    #[test]
    fn test_validate_outcome_task_count() {
        let mut want = expected("completed", &["discovery"], None);
        want.assertions.tasks_completed = Some(3);
        let failures = validate_outcome(&want, &observed("completed", &["discovery"], None));
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.contains("expected 3, got 1"));
    }
}
