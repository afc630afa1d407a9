//! Contract generation and simulated e-signature.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{decode_payload, prefixed_id, Agent, AgentCore, AgentKind};
use crate::config::FlowConfig;
use crate::error::{FlowError, Result};
use crate::latency::SimulatedLatency;
use crate::random::SharedRandom;
use crate::task::{Task, TaskType};

const GENERATE_MS: u64 = 1000;
const SIGNATURE_MS: u64 = 500;
const SIGNATURE_WINDOW_HOURS: i64 = 48;

/// Terms negotiated with a creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealDetails {
    pub campaign: String,
    pub brand: String,
    pub creator: String,
    pub deliverables: String,
    pub amount: f64,
    pub timeline: String,
    pub milestones: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContractRequest {
    deal_details: DealDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parties {
    pub brand: String,
    pub creator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terms {
    pub deliverables: String,
    pub timeline: String,
    pub payment: String,
    pub milestones: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub title: String,
    pub parties: Parties,
    pub terms: Terms,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    pub document_id: String,
    pub status: String,
    pub signers: Vec<String>,
    pub completed_signatures: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTimeline {
    pub generated: DateTime<Utc>,
    pub sent_for_signature: DateTime<Utc>,
    pub expected_completion: DateTime<Utc>,
}

/// Result document of contract generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractReport {
    pub contract_id: String,
    pub contract: Contract,
    pub signature_status: SignatureStatus,
    pub timeline: ContractTimeline,
    pub message: String,
}

/// Render an amount as dollars, dropping the cents when whole.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${:.0}", amount)
    } else {
        format!("${:.2}", amount)
    }
}

pub struct ContractAgent {
    core: AgentCore,
}

impl ContractAgent {
    pub fn new(config: &FlowConfig, rng: SharedRandom) -> Self {
        Self {
            core: AgentCore::new(
                "Contract Automation Agent",
                "contract_management",
                vec![
                    TaskType::GenerateContract,
                    TaskType::ESignature,
                    TaskType::TrackStatus,
                ],
                rng,
                SimulatedLatency::new(config.latency_scale),
            ),
        }
    }

    pub fn draft(deal: &DealDetails) -> Contract {
        Contract {
            title: format!("Influencer Agreement - {}", deal.campaign),
            parties: Parties {
                brand: deal.brand.clone(),
                creator: deal.creator.clone(),
            },
            terms: Terms {
                deliverables: deal.deliverables.clone(),
                timeline: deal.timeline.clone(),
                payment: format_amount(deal.amount),
                milestones: deal.milestones.clone(),
            },
            status: "generated".to_string(),
        }
    }
}

#[async_trait]
impl Agent for ContractAgent {
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
        let request: ContractRequest = decode_payload(task)?;
        let deal = request.deal_details;
        if !deal.amount.is_finite() || deal.amount < 0.0 {
            return Err(FlowError::InvalidPayload {
                task_type: task.task_type.to_string(),
                reason: format!("contract amount must be non-negative, got {}", deal.amount),
            });
        }

        let latency = self.core.latency();
        latency.pause(GENERATE_MS).await;
        let contract = Self::draft(&deal);
        let generated = Utc::now();

        latency.pause(SIGNATURE_MS).await;
        let signature_status = SignatureStatus {
            document_id: prefixed_id("doc"),
            status: "awaiting_signatures".to_string(),
            signers: vec!["brand".to_string(), "creator".to_string()],
            completed_signatures: 0,
        };
        let sent_for_signature = Utc::now();

        let report = ContractReport {
            contract_id: prefixed_id("contract"),
            contract,
            signature_status,
            timeline: ContractTimeline {
                generated,
                sent_for_signature,
                expected_completion: sent_for_signature + Duration::hours(SIGNATURE_WINDOW_HOURS),
            },
            message: "Contract generated and sent for e-signature".to_string(),
        };
        Ok(serde_json::to_value(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn deal_payload(amount: f64) -> serde_json::Value {
        json!({
            "dealDetails": {
                "campaign": "Launch",
                "brand": "Acme",
                "creator": "Selected Creator",
                "deliverables": "1 post",
                "amount": amount,
                "timeline": "1 week",
                "milestones": ["50% upfront", "50% on completion"]
            }
        })
    }

    fn agent() -> ContractAgent {
        let config = FlowConfig {
            latency_scale: 0.0,
            ..FlowConfig::default()
        };
        ContractAgent::new(&config, SharedRandom::constant(0.5))
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1000.0), "$1000");
        assert_eq!(format_amount(333.3333), "$333.33");
    }

    #[tokio::test]
    async fn test_contract_document() {
        let mut agent = agent();
        let task = Task::assigned(3, TaskType::GenerateContract, deal_payload(500.0));

        let value = agent.execute(&task).await.unwrap();
        let report: ContractReport = serde_json::from_value(value).unwrap();
        assert!(report.contract_id.starts_with("contract_"));
        assert_eq!(report.contract.title, "Influencer Agreement - Launch");
        assert_eq!(report.contract.parties.brand, "Acme");
        assert_eq!(report.contract.terms.payment, "$500");
        assert_eq!(report.contract.status, "generated");
        assert_eq!(report.signature_status.status, "awaiting_signatures");
        assert_eq!(report.signature_status.completed_signatures, 0);
        assert_eq!(
            report.timeline.expected_completion - report.timeline.sent_for_signature,
            Duration::hours(48)
        );
    }

    #[tokio::test]
    async fn test_missing_deal_details() {
        let mut agent = agent();
        let task = Task::assigned(3, TaskType::GenerateContract, json!({}));
        assert!(matches!(
            agent.execute(&task).await,
            Err(FlowError::InvalidPayload { .. })
        ));
    }

    #[tokio::test]
    async fn test_negative_amount_rejected() {
        let mut agent = agent();
        let task = Task::assigned(3, TaskType::GenerateContract, deal_payload(-1.0));
        let err = agent.execute(&task).await.unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }
}
