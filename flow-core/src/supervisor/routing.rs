use std::collections::HashMap;

use crate::error::{FlowError, Result};
use crate::task::TaskType;

/// Maps each task type to the single registered agent that handles it.
///
/// Agents are referenced by their registration index in the supervisor.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    routes: HashMap<TaskType, Route>,
}

#[derive(Debug, Clone)]
struct Route {
    agent: usize,
    agent_name: String,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim every capability for the agent at `agent`. Either all claims
    /// succeed or the table is left unchanged.
    pub fn claim(&mut self, agent: usize, agent_name: &str, capabilities: &[TaskType]) -> Result<()> {
        for task_type in capabilities {
            if let Some(existing) = self.routes.get(task_type) {
                return Err(FlowError::DuplicateCapability {
                    task_type: task_type.to_string(),
                    existing: existing.agent_name.clone(),
                    incoming: agent_name.to_string(),
                });
            }
        }
        for task_type in capabilities {
            self.routes.insert(
                task_type.clone(),
                Route {
                    agent,
                    agent_name: agent_name.to_string(),
                },
            );
        }
        Ok(())
    }

    /// Agent index for the given task type, if any agent claimed it.
    pub fn route(&self, task_type: &TaskType) -> Option<usize> {
        self.routes.get(task_type).map(|r| r.agent)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claimed_types_route_to_owner() {
        let mut table = RoutingTable::new();
        table
            .claim(0, "Discovery", &[TaskType::DiscoverCreators, TaskType::ProfileAnalysis])
            .unwrap();
        table.claim(1, "Outreach", &[TaskType::SendOutreach]).unwrap();

        assert_eq!(table.route(&TaskType::DiscoverCreators), Some(0));
        assert_eq!(table.route(&TaskType::ProfileAnalysis), Some(0));
        assert_eq!(table.route(&TaskType::SendOutreach), Some(1));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_unclaimed_type_has_no_route() {
        let table = RoutingTable::new();
        assert!(table.is_empty());
        assert_eq!(table.route(&TaskType::UpdateCrm), None);
        assert_eq!(table.route(&TaskType::Unknown("PLAN_PARTY".to_string())), None);
    }

    #[test]
    fn test_duplicate_claim_is_rejected_atomically() {
        let mut table = RoutingTable::new();
        table.claim(0, "CRM Data Agent", &[TaskType::UpdateCrm]).unwrap();

        let err = table
            .claim(1, "Shadow CRM", &[TaskType::DataSync, TaskType::UpdateCrm])
            .unwrap_err();
        assert!(matches!(err, FlowError::DuplicateCapability { .. }));

        // The non-conflicting capability was not claimed either.
        assert_eq!(table.route(&TaskType::DataSync), None);
        assert_eq!(table.route(&TaskType::UpdateCrm), Some(0));
    }
}
