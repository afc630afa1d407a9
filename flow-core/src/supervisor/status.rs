use serde::{Deserialize, Serialize};

use crate::agent::AgentSnapshot;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignCounts {
    pub active: usize,
    pub completed: usize,
    pub failed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounts {
    /// Tasks assigned and not yet resolved.
    pub queue: usize,
    pub completed: usize,
    /// Value of the monotonic task counter.
    pub total: u64,
}

/// Read-only projection over agents, campaigns and tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatus {
    pub agents: Vec<AgentSnapshot>,
    pub campaigns: CampaignCounts,
    pub tasks: TaskCounts,
}
