use thiserror::Error;

/// Error types for flow-core operations.
/// Shared by the supervisor, the agents, and the harness binary.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("No agent available for task: {0}")]
    NoAgentAvailable(String),

    #[error("Task type '{task_type}' is already handled by '{existing}', cannot register '{incoming}'")]
    DuplicateCapability {
        task_type: String,
        existing: String,
        incoming: String,
    },

    #[error("Invalid payload for task {task_type}: {reason}")]
    InvalidPayload { task_type: String, reason: String },

    #[error("Payment {payment_id} declined for amount {amount}")]
    PaymentDeclined { payment_id: String, amount: f64 },

    #[error("Invalid campaign: {0}")]
    InvalidCampaign(String),

    #[error("Invalid status transition: cannot go from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },

    #[error("Invalid status value: {0}. Valid values: active, completed, failed")]
    InvalidStatus(String),

    #[error("Campaign '{0}' not found")]
    CampaignNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FlowError {
    pub(crate) fn invalid_payload(task_type: impl ToString, err: serde_json::Error) -> Self {
        FlowError::InvalidPayload {
            task_type: task_type.to_string(),
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_agent_message_names_task_type() {
        let err = FlowError::NoAgentAvailable("DISCOVER_CREATORS".to_string());
        assert_eq!(
            err.to_string(),
            "No agent available for task: DISCOVER_CREATORS"
        );
    }

    #[test]
    fn test_duplicate_capability_message() {
        let err = FlowError::DuplicateCapability {
            task_type: "UPDATE_CRM".to_string(),
            existing: "CRM Data Agent".to_string(),
            incoming: "Shadow CRM".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("UPDATE_CRM"));
        assert!(msg.contains("CRM Data Agent"));
        assert!(msg.contains("Shadow CRM"));
    }
}
