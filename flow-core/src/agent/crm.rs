//! CRM writes: creator profiles, interaction log, campaign sync.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{decode_payload, prefixed_id, Agent, AgentCore, AgentKind};
use crate::config::FlowConfig;
use crate::error::{FlowError, Result};
use crate::latency::SimulatedLatency;
use crate::random::SharedRandom;
use crate::task::{Task, TaskType};

const PROFILE_UPDATE_MS: u64 = 400;
const INTERACTION_LOG_MS: u64 = 200;
const CAMPAIGN_SYNC_MS: u64 = 600;

pub const UPDATE_CREATOR_PROFILE: &str = "UPDATE_CREATOR_PROFILE";
pub const LOG_INTERACTION: &str = "LOG_INTERACTION";
pub const SYNC_CAMPAIGN_DATA: &str = "SYNC_CAMPAIGN_DATA";

#[derive(Debug, Deserialize)]
struct CrmRequest {
    action: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatorProfileUpdate {
    creator_id: String,
    #[serde(default)]
    updates: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct InteractionData {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    participants: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CampaignSyncData {
    campaign_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateRecord {
    pub profile_id: String,
    pub updated_fields: Vec<String>,
    pub last_updated: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    pub interaction_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub participants: Vec<String>,
    pub logged_at: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSyncRecord {
    pub campaign_id: String,
    pub synced_records: u64,
    pub last_sync: DateTime<Utc>,
    pub message: String,
}

pub struct CrmAgent {
    core: AgentCore,
}

impl CrmAgent {
    pub fn new(config: &FlowConfig, rng: SharedRandom) -> Self {
        Self {
            core: AgentCore::new(
                "CRM Data Agent",
                "data_management",
                vec![
                    TaskType::UpdateCrm,
                    TaskType::ManageRelationships,
                    TaskType::DataSync,
                ],
                rng,
                SimulatedLatency::new(config.latency_scale),
            ),
        }
    }

    async fn update_creator_profile(&self, data: CreatorProfileUpdate) -> ProfileUpdateRecord {
        self.core.latency().pause(PROFILE_UPDATE_MS).await;
        ProfileUpdateRecord {
            profile_id: data.creator_id,
            updated_fields: data.updates.keys().cloned().collect(),
            last_updated: Utc::now(),
            message: "Creator profile updated successfully".to_string(),
        }
    }

    async fn log_interaction(&self, data: InteractionData) -> InteractionRecord {
        self.core.latency().pause(INTERACTION_LOG_MS).await;
        InteractionRecord {
            interaction_id: prefixed_id("int"),
            kind: data.kind,
            participants: data.participants,
            logged_at: Utc::now(),
            message: "Interaction logged in CRM".to_string(),
        }
    }

    async fn sync_campaign_data(&self, data: CampaignSyncData) -> CampaignSyncRecord {
        self.core.latency().pause(CAMPAIGN_SYNC_MS).await;
        CampaignSyncRecord {
            campaign_id: data.campaign_id,
            synced_records: self.core.rng().range(10, 60),
            last_sync: Utc::now(),
            message: "Campaign data synchronized".to_string(),
        }
    }
}

fn decode_data<T: serde::de::DeserializeOwned>(task: &Task, data: serde_json::Value) -> Result<T> {
    serde_json::from_value(data).map_err(|e| FlowError::invalid_payload(&task.task_type, e))
}

#[async_trait]
impl Agent for CrmAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Crm
    }

    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    async fn execute(&mut self, task: &Task) -> Result<serde_json::Value> {
        let request: CrmRequest = decode_payload(task)?;
        debug!(action = %request.action, "crm write");

        let value = match request.action.as_str() {
            UPDATE_CREATOR_PROFILE => {
                let data = decode_data(task, request.data)?;
                serde_json::to_value(self.update_creator_profile(data).await)?
            }
            LOG_INTERACTION => {
                let data = decode_data(task, request.data)?;
                serde_json::to_value(self.log_interaction(data).await)?
            }
            SYNC_CAMPAIGN_DATA => {
                let data = decode_data(task, request.data)?;
                serde_json::to_value(self.sync_campaign_data(data).await)?
            }
            other => serde_json::json!({
                "action": other,
                "message": "Unknown CRM action",
            }),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn agent() -> CrmAgent {
        let config = FlowConfig {
            latency_scale: 0.0,
            ..FlowConfig::default()
        };
        CrmAgent::new(&config, SharedRandom::constant(0.0))
    }

    #[tokio::test]
    async fn test_sync_campaign_data() {
        let mut agent = agent();
        let task = Task::assigned(
            6,
            TaskType::UpdateCrm,
            json!({"action": "SYNC_CAMPAIGN_DATA", "data": {"campaignId": "campaign_1"}}),
        );
        let value = agent.execute(&task).await.unwrap();
        assert_eq!(value["campaignId"], "campaign_1");
        assert_eq!(value["syncedRecords"], 10);
        assert_eq!(value["message"], "Campaign data synchronized");
    }

    #[tokio::test]
    async fn test_update_creator_profile() {
        let mut agent = agent();
        let task = Task::assigned(
            6,
            TaskType::UpdateCrm,
            json!({
                "action": "UPDATE_CREATOR_PROFILE",
                "data": {"creatorId": "creator_3", "updates": {"rate": 900, "niche": "Food"}}
            }),
        );
        let value = agent.execute(&task).await.unwrap();
        let record: ProfileUpdateRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.profile_id, "creator_3");
        assert_eq!(record.updated_fields.len(), 2);
        assert!(record.updated_fields.contains(&"rate".to_string()));
    }

    #[tokio::test]
    async fn test_log_interaction() {
        let mut agent = agent();
        let task = Task::assigned(
            6,
            TaskType::ManageRelationships,
            json!({
                "action": "LOG_INTERACTION",
                "data": {"type": "email", "participants": ["brand", "creator_1"]}
            }),
        );
        let value = agent.execute(&task).await.unwrap();
        assert_eq!(value["type"], "email");
        assert_eq!(value["participants"], json!(["brand", "creator_1"]));
        assert!(value["interactionId"].as_str().unwrap().starts_with("int_"));
    }

    #[tokio::test]
    async fn test_unknown_action() {
        let mut agent = agent();
        let task = Task::assigned(6, TaskType::DataSync, json!({"action": "PURGE"}));
        let value = agent.execute(&task).await.unwrap();
        assert_eq!(value["message"], "Unknown CRM action");
    }

    #[tokio::test]
    async fn test_malformed_action_data() {
        let mut agent = agent();
        let task = Task::assigned(
            6,
            TaskType::UpdateCrm,
            json!({"action": "SYNC_CAMPAIGN_DATA", "data": {}}),
        );
        assert!(matches!(
            agent.execute(&task).await,
            Err(FlowError::InvalidPayload { .. })
        ));
    }
}
