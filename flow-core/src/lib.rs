//! flow-core library
//!
//! Campaign workflow orchestration for InfluencerFlow: specialist agents,
//! task delegation and campaign bookkeeping.

pub mod agent;
pub mod campaign;
pub mod config;
pub mod error;
pub mod latency;
pub mod random;
pub mod supervisor;
pub mod task;

pub use agent::{Agent, AgentCore, AgentKind, AgentSnapshot, AgentStatus};
pub use campaign::{Campaign, CampaignInput, CampaignReceipt, CampaignStatus, WorkflowStage};
pub use config::FlowConfig;
pub use error::{FlowError, Result};
pub use random::{RandomSource, SharedRandom};
pub use supervisor::{Supervisor, SupervisorBuilder, SystemStatus};
pub use task::{Task, TaskOutcome, TaskStatus, TaskType};
