//! Work items passed from the supervisor to agents.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task type tag. Known tags map to variants; anything else is kept verbatim
/// in `Unknown` so it can still be routed (and rejected) by the supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskType {
    DiscoverCreators,
    SearchInfluencers,
    ProfileAnalysis,
    SendOutreach,
    NegotiateDeals,
    MultilingualComm,
    GenerateContract,
    ESignature,
    TrackStatus,
    ProcessPayment,
    VerifyPayment,
    RefundPayment,
    AnalyzePerformance,
    GenerateReports,
    TrackRoi,
    UpdateCrm,
    ManageRelationships,
    DataSync,
    Unknown(String),
}

impl TaskType {
    pub fn as_str(&self) -> &str {
        match self {
            TaskType::DiscoverCreators => "DISCOVER_CREATORS",
            TaskType::SearchInfluencers => "SEARCH_INFLUENCERS",
            TaskType::ProfileAnalysis => "PROFILE_ANALYSIS",
            TaskType::SendOutreach => "SEND_OUTREACH",
            TaskType::NegotiateDeals => "NEGOTIATE_DEALS",
            TaskType::MultilingualComm => "MULTILINGUAL_COMM",
            TaskType::GenerateContract => "GENERATE_CONTRACT",
            TaskType::ESignature => "E_SIGNATURE",
            TaskType::TrackStatus => "TRACK_STATUS",
            TaskType::ProcessPayment => "PROCESS_PAYMENT",
            TaskType::VerifyPayment => "VERIFY_PAYMENT",
            TaskType::RefundPayment => "REFUND_PAYMENT",
            TaskType::AnalyzePerformance => "ANALYZE_PERFORMANCE",
            TaskType::GenerateReports => "GENERATE_REPORTS",
            TaskType::TrackRoi => "TRACK_ROI",
            TaskType::UpdateCrm => "UPDATE_CRM",
            TaskType::ManageRelationships => "MANAGE_RELATIONSHIPS",
            TaskType::DataSync => "DATA_SYNC",
            TaskType::Unknown(tag) => tag,
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TaskType {
    fn from(s: &str) -> Self {
        match s {
            "DISCOVER_CREATORS" => TaskType::DiscoverCreators,
            "SEARCH_INFLUENCERS" => TaskType::SearchInfluencers,
            "PROFILE_ANALYSIS" => TaskType::ProfileAnalysis,
            "SEND_OUTREACH" => TaskType::SendOutreach,
            "NEGOTIATE_DEALS" => TaskType::NegotiateDeals,
            "MULTILINGUAL_COMM" => TaskType::MultilingualComm,
            "GENERATE_CONTRACT" => TaskType::GenerateContract,
            "E_SIGNATURE" => TaskType::ESignature,
            "TRACK_STATUS" => TaskType::TrackStatus,
            "PROCESS_PAYMENT" => TaskType::ProcessPayment,
            "VERIFY_PAYMENT" => TaskType::VerifyPayment,
            "REFUND_PAYMENT" => TaskType::RefundPayment,
            "ANALYZE_PERFORMANCE" => TaskType::AnalyzePerformance,
            "GENERATE_REPORTS" => TaskType::GenerateReports,
            "TRACK_ROI" => TaskType::TrackRoi,
            "UPDATE_CRM" => TaskType::UpdateCrm,
            "MANAGE_RELATIONSHIPS" => TaskType::ManageRelationships,
            "DATA_SYNC" => TaskType::DataSync,
            other => TaskType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for TaskType {
    fn from(s: String) -> Self {
        TaskType::from(s.as_str())
    }
}

impl From<TaskType> for String {
    fn from(t: TaskType) -> Self {
        t.as_str().to_string()
    }
}

impl std::str::FromStr for TaskType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(TaskType::from(s))
    }
}

/// Task lifecycle status. Tasks are created already assigned to an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Assigned,
    Completed,
    Failed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Assigned => write!(f, "assigned"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A unit of work delegated to one agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub payload: serde_json::Value,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Task {
    pub fn assigned(id: u64, task_type: TaskType, payload: serde_json::Value) -> Self {
        Self {
            id,
            task_type,
            payload,
            status: TaskStatus::Assigned,
            created_at: Utc::now(),
            completed_at: None,
            error: None,
        }
    }

    pub fn complete(&mut self) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = TaskStatus::Failed;
        self.error = Some(error.into());
    }
}

/// Result envelope an agent returns for a processed task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOutcome {
    pub task_id: u64,
    pub agent_id: String,
    pub agent_name: String,
    pub result: serde_json::Value,
    /// Simulated processing time in milliseconds.
    pub processing_time: u64,
    pub timestamp: DateTime<Utc>,
    pub status: TaskStatus,
}
