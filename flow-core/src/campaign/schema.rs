use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FlowError;
use crate::task::{TaskOutcome, TaskType};

/// Overall campaign status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Active,
    Completed,
    Failed,
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignStatus::Active => write!(f, "active"),
            CampaignStatus::Completed => write!(f, "completed"),
            CampaignStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for CampaignStatus {
    type Err = FlowError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(CampaignStatus::Active),
            "completed" => Ok(CampaignStatus::Completed),
            "failed" => Ok(CampaignStatus::Failed),
            _ => Err(FlowError::InvalidStatus(s.to_string())),
        }
    }
}

/// One stage of the campaign workflow, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    Discovery,
    Outreach,
    Contract,
    Payment,
    Analytics,
    Crm,
}

impl WorkflowStage {
    /// The task type delegated for this stage.
    pub fn task_type(self) -> TaskType {
        match self {
            WorkflowStage::Discovery => TaskType::DiscoverCreators,
            WorkflowStage::Outreach => TaskType::SendOutreach,
            WorkflowStage::Contract => TaskType::GenerateContract,
            WorkflowStage::Payment => TaskType::ProcessPayment,
            WorkflowStage::Analytics => TaskType::AnalyzePerformance,
            WorkflowStage::Crm => TaskType::UpdateCrm,
        }
    }
}

impl std::fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowStage::Discovery => write!(f, "discovery"),
            WorkflowStage::Outreach => write!(f, "outreach"),
            WorkflowStage::Contract => write!(f, "contract"),
            WorkflowStage::Payment => write!(f, "payment"),
            WorkflowStage::Analytics => write!(f, "analytics"),
            WorkflowStage::Crm => write!(f, "crm"),
        }
    }
}

/// Audience filter supplied with a campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_followers: Option<u64>,
}

/// Caller-supplied campaign definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignInput {
    pub title: String,
    pub brand: String,
    pub budget: f64,
    #[serde(default)]
    pub target_criteria: TargetCriteria,
    #[serde(default)]
    pub deliverables: String,
    #[serde(default)]
    pub timeline: String,
}

/// A recorded workflow stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub step: WorkflowStage,
    pub result: TaskOutcome,
    pub status: String,
}

impl WorkflowStep {
    pub fn completed(step: WorkflowStage, result: TaskOutcome) -> Self {
        Self {
            step,
            result,
            status: "completed".to_string(),
        }
    }
}

/// Campaign record held by the supervisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub budget: f64,
    pub target_criteria: TargetCriteria,
    pub deliverables: String,
    pub timeline: String,
    pub created_at: DateTime<Utc>,
    pub status: CampaignStatus,
    pub workflow: Vec<WorkflowStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Campaign {
    /// Create an active campaign from validated input.
    pub fn new(id: String, input: CampaignInput) -> Self {
        Self {
            id,
            title: input.title,
            brand: input.brand,
            budget: input.budget,
            target_criteria: input.target_criteria,
            deliverables: input.deliverables,
            timeline: input.timeline,
            created_at: Utc::now(),
            status: CampaignStatus::Active,
            workflow: Vec::new(),
            error: None,
        }
    }

    pub fn stages(&self) -> Vec<WorkflowStage> {
        self.workflow.iter().map(|s| s.step).collect()
    }
}

/// Returned to the caller of a successful campaign run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignReceipt {
    pub campaign_id: String,
    pub status: String,
    pub workflow: Vec<WorkflowStep>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("Completed".parse::<CampaignStatus>().unwrap(), CampaignStatus::Completed);
        assert_eq!(CampaignStatus::Failed.to_string(), "failed");
        let err = "paused".parse::<CampaignStatus>().unwrap_err();
        assert!(err.to_string().contains("paused"));
    }

    #[test]
    fn test_input_from_camel_case_json() {
        let input: CampaignInput = serde_json::from_value(json!({
            "title": "T",
            "brand": "B",
            "budget": 1000,
            "targetCriteria": {"niche": "Tech", "platform": "youtube", "minFollowers": 1000},
            "deliverables": "1 post",
            "timeline": "1 week"
        }))
        .unwrap();
        assert_eq!(input.budget, 1000.0);
        assert_eq!(input.target_criteria.min_followers, Some(1000));
        assert_eq!(input.target_criteria.platform.as_deref(), Some("youtube"));
    }

    #[test]
    fn test_stage_task_types() {
        assert_eq!(WorkflowStage::Discovery.task_type(), TaskType::DiscoverCreators);
        assert_eq!(WorkflowStage::Crm.task_type(), TaskType::UpdateCrm);
        assert_eq!(WorkflowStage::Payment.to_string(), "payment");
    }
}
