//! Scenario loader

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use super::types::{ExpectedState, Scenario, ScenarioConfig};
use flow_core::CampaignInput;

/// Load a scenario from a directory
pub fn load_scenario(scenario_dir: &Path) -> Result<Scenario> {
    let name = scenario_dir
        .file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .context("Invalid scenario directory name")?;

    let config: ScenarioConfig = read_json(scenario_dir, "scenario.json")?;
    let campaign: CampaignInput = read_json(scenario_dir, "campaign.json")?;
    let expected: ExpectedState = read_json(scenario_dir, "expected.json")?;

    Ok(Scenario {
        name,
        path: scenario_dir.to_path_buf(),
        config,
        campaign,
        expected,
    })
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T> {
    let path = dir.join(file);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {} at {}", file, path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} at {}", file, path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const CAMPAIGN: &str = r#"{
        "title": "T",
        "brand": "B",
        "budget": 1000,
        "targetCriteria": {"niche": "Tech", "platform": "youtube", "minFollowers": 1000},
        "deliverables": "1 post",
        "timeline": "1 week"
    }"#;

    const EXPECTED: &str = r#"{
        "schema_version": 1,
        "assertions": {
            "final_status": "completed",
            "workflow_steps": ["discovery", "outreach", "contract", "payment", "analytics", "crm"]
        }
    }"#;

    fn create_test_scenario(dir: &Path) {
        fs::write(dir.join("scenario.json"), r#"{"constant_roll": 0.0}"#).unwrap();
        fs::write(dir.join("campaign.json"), CAMPAIGN).unwrap();
        fs::write(dir.join("expected.json"), EXPECTED).unwrap();
    }

    #[test]
    fn test_load_scenario_basic() {
        let temp = TempDir::new().unwrap();
        let scenario_dir = temp.path().join("01-test-scenario");
        fs::create_dir(&scenario_dir).unwrap();
        create_test_scenario(&scenario_dir);

        let scenario = load_scenario(&scenario_dir).unwrap();
        assert_eq!(scenario.name, "01-test-scenario");
        assert_eq!(scenario.config.constant_roll, Some(0.0));
        assert_eq!(scenario.campaign.budget, 1000.0);
        assert_eq!(scenario.expected.assertions.workflow_steps.len(), 6);
    }

    #[test]
    fn test_load_scenario_missing_scenario_json() {
        let temp = TempDir::new().unwrap();
        let scenario_dir = temp.path().join("05-no-config");
        fs::create_dir(&scenario_dir).unwrap();
        fs::write(scenario_dir.join("campaign.json"), CAMPAIGN).unwrap();
        fs::write(scenario_dir.join("expected.json"), EXPECTED).unwrap();

        let result = load_scenario(&scenario_dir);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("scenario.json"));
    }

    #[test]
    fn test_load_scenario_missing_campaign() {
        let temp = TempDir::new().unwrap();
        let scenario_dir = temp.path().join("03-missing");
        fs::create_dir(&scenario_dir).unwrap();
        fs::write(scenario_dir.join("scenario.json"), "{}").unwrap();
        fs::write(scenario_dir.join("expected.json"), EXPECTED).unwrap();

        let result = load_scenario(&scenario_dir);
        assert!(result.unwrap_err().to_string().contains("campaign.json"));
    }

    #[test]
    fn test_load_scenario_malformed_expected() {
        let temp = TempDir::new().unwrap();
        let scenario_dir = temp.path().join("04-malformed");
        fs::create_dir(&scenario_dir).unwrap();
        fs::write(scenario_dir.join("scenario.json"), "{}").unwrap();
        fs::write(scenario_dir.join("campaign.json"), CAMPAIGN).unwrap();
        fs::write(scenario_dir.join("expected.json"), r#"{"schema_version": 1}"#).unwrap();

        let err = load_scenario(&scenario_dir).unwrap_err();
        assert!(err.to_string().contains("Failed to parse expected.json"));
    }
}
