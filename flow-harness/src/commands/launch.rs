//! Launch command implementation
//!
//! Runs one campaign from a JSON input file with the user's configuration.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use flow_core::{CampaignInput, CampaignReceipt, FlowConfig, Supervisor, SystemStatus};

pub struct LaunchConfig {
    /// Campaign input JSON
    pub input: PathBuf,
    /// Config file (default: ~/.config/influencer-flow/config.toml)
    pub config_path: Option<PathBuf>,
    /// Overrides the configured seed
    pub seed: Option<u64>,
    /// Skip simulated delays
    pub instant: bool,
}

/// Outcome of a launch: the receipt on success, the error message otherwise.
#[derive(Debug)]
pub struct LaunchResult {
    pub receipt: Option<CampaignReceipt>,
    pub error: Option<String>,
    pub status: SystemStatus,
}

pub fn load_input(path: &PathBuf) -> Result<CampaignInput> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read campaign input at {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse campaign input at {}", path.display()))
}

pub async fn launch(config: &LaunchConfig) -> Result<LaunchResult> {
    let input = load_input(&config.input)?;

    let mut flow_config = FlowConfig::load(config.config_path.as_ref())?;
    if config.seed.is_some() {
        flow_config.seed = config.seed;
    }
    if config.instant {
        flow_config.latency_scale = 0.0;
    }

    let mut supervisor = Supervisor::new(flow_config).context("Failed to build supervisor")?;
    let (receipt, error) = match supervisor.create_campaign(input).await {
        Ok(receipt) => (Some(receipt), None),
        Err(e) => (None, Some(e.to_string())),
    };

    Ok(LaunchResult {
        receipt,
        error,
        status: supervisor.system_status(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_input_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("campaign.json");
        fs::write(&path, "{\"title\": 3}").unwrap();

        let err = load_input(&path).unwrap_err();
        assert!(err.to_string().contains("campaign.json"));
    }

    #[tokio::test]
    async fn test_launch_rejected_input_keeps_status() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("campaign.json");
        fs::write(&input, r#"{"title": "", "brand": "B", "budget": 10}"#).unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "latency_scale = 0.0\n").unwrap();

        let result = launch(&LaunchConfig {
            input,
            config_path: Some(config_path),
            seed: Some(1),
            instant: true,
        })
        .await
        .unwrap();

        assert!(result.receipt.is_none());
        assert!(result.error.unwrap().contains("title"));
        assert_eq!(result.status.campaigns.total, 0);
    }
}
