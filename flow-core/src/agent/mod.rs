//! Agent capability contract and the six specialist agents.
//!
//! An agent declares a fixed set of task types it accepts and runs one task
//! at a time. [`Agent::process_task`] owns the status lifecycle
//! (idle → working → idle, or working → error); specialists only implement
//! [`Agent::execute`].

pub mod analytics;
pub mod contract;
pub mod crm;
pub mod discovery;
pub mod outreach;
pub mod payment;

use std::fmt;

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{FlowError, Result};
use crate::latency::{base_processing_ms, SimulatedLatency};
use crate::random::SharedRandom;
use crate::task::{Task, TaskOutcome, TaskStatus, TaskType};

pub use analytics::AnalyticsAgent;
pub use contract::ContractAgent;
pub use crm::CrmAgent;
pub use discovery::CreatorDiscoveryAgent;
pub use outreach::OutreachAgent;
pub use payment::PaymentAgent;

/// Runtime status of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Idle,
    Working,
    Error,
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentStatus::Idle => write!(f, "idle"),
            AgentStatus::Working => write!(f, "working"),
            AgentStatus::Error => write!(f, "error"),
        }
    }
}

/// The six specialties a supervisor can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Discovery,
    Outreach,
    Contract,
    Payment,
    Analytics,
    Crm,
}

impl AgentKind {
    pub const ALL: [AgentKind; 6] = [
        AgentKind::Discovery,
        AgentKind::Outreach,
        AgentKind::Contract,
        AgentKind::Payment,
        AgentKind::Analytics,
        AgentKind::Crm,
    ];
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Discovery => write!(f, "discovery"),
            AgentKind::Outreach => write!(f, "outreach"),
            AgentKind::Contract => write!(f, "contract"),
            AgentKind::Payment => write!(f, "payment"),
            AgentKind::Analytics => write!(f, "analytics"),
            AgentKind::Crm => write!(f, "crm"),
        }
    }
}

impl std::str::FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "discovery" => Ok(AgentKind::Discovery),
            "outreach" => Ok(AgentKind::Outreach),
            "contract" => Ok(AgentKind::Contract),
            "payment" => Ok(AgentKind::Payment),
            "analytics" => Ok(AgentKind::Analytics),
            "crm" => Ok(AgentKind::Crm),
            other => Err(format!(
                "Invalid agent '{}'. Valid values: discovery, outreach, contract, payment, analytics, crm",
                other
            )),
        }
    }
}

/// Identity and mutable runtime state shared by every agent.
#[derive(Debug)]
pub struct AgentCore {
    id: String,
    name: String,
    specialty: String,
    capabilities: Vec<TaskType>,
    status: AgentStatus,
    current_task: Option<Task>,
    completed_tasks: u64,
    performance: u8,
    rng: SharedRandom,
    latency: SimulatedLatency,
}

impl AgentCore {
    /// Draws one value from `rng` for the starting performance score.
    pub fn new(
        name: &str,
        specialty: &str,
        capabilities: Vec<TaskType>,
        rng: SharedRandom,
        latency: SimulatedLatency,
    ) -> Self {
        let performance = roll_performance(&rng);
        Self {
            id: prefixed_id("agent"),
            name: name.to_string(),
            specialty: specialty.to_string(),
            capabilities,
            status: AgentStatus::Idle,
            current_task: None,
            completed_tasks: 0,
            performance,
            rng,
            latency,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    pub fn capabilities(&self) -> &[TaskType] {
        &self.capabilities
    }

    pub fn status(&self) -> AgentStatus {
        self.status
    }

    pub fn current_task(&self) -> Option<&Task> {
        self.current_task.as_ref()
    }

    pub fn completed_tasks(&self) -> u64 {
        self.completed_tasks
    }

    pub fn performance(&self) -> u8 {
        self.performance
    }

    pub fn rng(&self) -> &SharedRandom {
        &self.rng
    }

    pub fn latency(&self) -> SimulatedLatency {
        self.latency
    }

    fn begin(&mut self, task: &Task) {
        self.status = AgentStatus::Working;
        self.current_task = Some(task.clone());
    }

    fn finish(&mut self) {
        self.status = AgentStatus::Idle;
        self.current_task = None;
        self.completed_tasks += 1;
        self.performance = roll_performance(&self.rng);
    }

    fn fail(&mut self) {
        self.status = AgentStatus::Error;
        self.current_task = None;
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            specialty: self.specialty.clone(),
            status: self.status,
            completed_tasks: self.completed_tasks,
            performance: self.performance,
            current_task: self.current_task.as_ref().map(|t| t.task_type.clone()),
        }
    }
}

/// Read-only view of an agent for status reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentSnapshot {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub status: AgentStatus,
    pub completed_tasks: u64,
    pub performance: u8,
    pub current_task: Option<TaskType>,
}

/// Capability holder that processes delegated tasks.
#[async_trait]
pub trait Agent: Send {
    fn kind(&self) -> AgentKind;

    fn core(&self) -> &AgentCore;

    fn core_mut(&mut self) -> &mut AgentCore;

    /// Run the type-specific operation and return its result document.
    async fn execute(&mut self, task: &Task) -> Result<serde_json::Value>;

    fn can_handle(&self, task_type: &TaskType) -> bool {
        self.core().capabilities().contains(task_type)
    }

    /// Process one task through the full status lifecycle.
    async fn process_task(&mut self, task: &Task) -> Result<TaskOutcome> {
        self.core_mut().begin(task);
        debug!(
            agent = %self.core().name(),
            task_id = task.id,
            task_type = %task.task_type,
            "agent started task"
        );

        let latency = self.core().latency();
        let base_ms = base_processing_ms(&task.task_type);
        latency.pause(base_ms).await;

        match self.execute(task).await {
            Ok(result) => {
                self.core_mut().finish();
                let core = self.core();
                Ok(TaskOutcome {
                    task_id: task.id,
                    agent_id: core.id().to_string(),
                    agent_name: core.name().to_string(),
                    result,
                    processing_time: latency.scaled_ms(base_ms),
                    timestamp: Utc::now(),
                    status: TaskStatus::Completed,
                })
            }
            Err(e) => {
                self.core_mut().fail();
                warn!(
                    agent = %self.core().name(),
                    task_id = task.id,
                    error = %e,
                    "agent failed task"
                );
                Err(e)
            }
        }
    }
}

/// Decode a task payload into the specialist's request shape.
pub(crate) fn decode_payload<T: DeserializeOwned>(task: &Task) -> Result<T> {
    serde_json::from_value(task.payload.clone())
        .map_err(|e| FlowError::invalid_payload(&task.task_type, e))
}

pub(crate) fn prefixed_id(prefix: &str) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &raw[..12])
}

fn roll_performance(rng: &SharedRandom) -> u8 {
    rng.range(80, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoAgent {
        core: AgentCore,
        fail: bool,
    }

    impl EchoAgent {
        fn new(fail: bool) -> Self {
            Self {
                core: AgentCore::new(
                    "Echo Agent",
                    "echo",
                    vec![TaskType::TrackStatus],
                    SharedRandom::constant(0.5),
                    SimulatedLatency::instant(),
                ),
                fail,
            }
        }
    }

    #[async_trait]
    impl Agent for EchoAgent {
        fn kind(&self) -> AgentKind {
            AgentKind::Contract
        }

        fn core(&self) -> &AgentCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut AgentCore {
            &mut self.core
        }

        async fn execute(&mut self, task: &Task) -> Result<serde_json::Value> {
            assert_eq!(self.core.status(), AgentStatus::Working);
            assert_eq!(self.core.current_task().map(|t| t.id), Some(task.id));
            if self.fail {
                return Err(FlowError::InvalidCampaign("boom".to_string()));
            }
            Ok(task.payload.clone())
        }
    }

    #[test]
    fn test_agent_kind_parse() {
        assert_eq!("CRM".parse::<AgentKind>().unwrap(), AgentKind::Crm);
        assert_eq!("discovery".parse::<AgentKind>().unwrap(), AgentKind::Discovery);
        assert!("billing".parse::<AgentKind>().is_err());
        assert_eq!(AgentKind::Analytics.to_string(), "analytics");
    }

    #[test]
    fn test_can_handle_is_membership() {
        let agent = EchoAgent::new(false);
        assert!(agent.can_handle(&TaskType::TrackStatus));
        assert!(!agent.can_handle(&TaskType::UpdateCrm));
    }

    #[tokio::test]
    async fn test_process_task_success_lifecycle() {
        let mut agent = EchoAgent::new(false);
        let task = Task::assigned(9, TaskType::TrackStatus, json!({"ok": true}));

        let outcome = agent.process_task(&task).await.unwrap();
        assert_eq!(outcome.task_id, 9);
        assert_eq!(outcome.agent_name, "Echo Agent");
        assert_eq!(outcome.result, json!({"ok": true}));
        assert_eq!(outcome.status, TaskStatus::Completed);
        assert_eq!(outcome.processing_time, 0);

        assert_eq!(agent.core().status(), AgentStatus::Idle);
        assert!(agent.core().current_task().is_none());
        assert_eq!(agent.core().completed_tasks(), 1);
        assert!((80..100).contains(&agent.core().performance()));
    }

    #[tokio::test]
    async fn test_process_task_failure_sets_error() {
        let mut agent = EchoAgent::new(true);
        let task = Task::assigned(1, TaskType::TrackStatus, json!({}));

        let err = agent.process_task(&task).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
        assert_eq!(agent.core().status(), AgentStatus::Error);
        assert!(agent.core().current_task().is_none());
        assert_eq!(agent.core().completed_tasks(), 0);
    }

    #[tokio::test]
    async fn test_error_status_is_not_sticky() {
        let mut agent = EchoAgent::new(true);
        let task = Task::assigned(1, TaskType::TrackStatus, json!({}));
        let _ = agent.process_task(&task).await;
        assert_eq!(agent.core().status(), AgentStatus::Error);

        agent.fail = false;
        agent.process_task(&task).await.unwrap();
        assert_eq!(agent.core().status(), AgentStatus::Idle);
        assert_eq!(agent.core().completed_tasks(), 1);
    }

    #[test]
    fn test_snapshot_reports_state() {
        let agent = EchoAgent::new(false);
        let snapshot = agent.core().snapshot();
        assert_eq!(snapshot.name, "Echo Agent");
        assert_eq!(snapshot.status, AgentStatus::Idle);
        assert!(snapshot.current_task.is_none());
        assert!(snapshot.id.starts_with("agent_"));
    }
}
