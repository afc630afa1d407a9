//! Personalised outreach to discovered creators.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{decode_payload, Agent, AgentCore, AgentKind};
use crate::config::FlowConfig;
use crate::error::Result;
use crate::latency::SimulatedLatency;
use crate::random::SharedRandom;
use crate::task::{Task, TaskType};

const COMPOSE_MS: u64 = 300;
const SEND_MS: u64 = 200;

/// The subset of a creator profile outreach needs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachTarget {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub niche: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub rate: u64,
}

/// Campaign details quoted in outreach messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBrief {
    pub title: String,
    pub brand: String,
}

#[derive(Debug, Deserialize)]
struct OutreachRequest {
    #[serde(default)]
    creators: Vec<OutreachTarget>,
    campaign: CampaignBrief,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachMessage {
    pub subject: String,
    pub body: String,
    pub personalized_elements: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachResult {
    pub creator_id: String,
    pub creator_name: String,
    pub status: DeliveryStatus,
    /// Subject line of the message.
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachSummary {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
    pub expected_responses: u32,
}

/// Result document of an outreach batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutreachReport {
    pub outreach_results: Vec<OutreachResult>,
    pub summary: OutreachSummary,
    pub message: String,
}

/// Responses expected from `sent` delivered messages, rounded up so any
/// successful batch can produce a deal.
pub fn expected_responses(sent: usize, response_rate: f64) -> u32 {
    // Absorb float noise such as 20 * 0.15 = 3.0000000000000004.
    let raw = sent as f64 * response_rate - 1e-9;
    raw.ceil().max(0.0) as u32
}

pub struct OutreachAgent {
    core: AgentCore,
    success_rate: f64,
    response_rate: f64,
}

impl OutreachAgent {
    pub fn new(config: &FlowConfig, rng: SharedRandom) -> Self {
        Self {
            core: AgentCore::new(
                "AI Outreach Agent",
                "outreach_automation",
                vec![
                    TaskType::SendOutreach,
                    TaskType::NegotiateDeals,
                    TaskType::MultilingualComm,
                ],
                rng,
                SimulatedLatency::new(config.latency_scale),
            ),
            success_rate: config.outreach_success_rate,
            response_rate: config.response_rate,
        }
    }

    pub fn compose(target: &OutreachTarget, campaign: &CampaignBrief) -> OutreachMessage {
        OutreachMessage {
            subject: format!("Collaboration Opportunity - {}", campaign.title),
            body: format!(
                "Hi {},\n\nI hope this email finds you well! I came across your {} content and \
                 was impressed by your {} expertise.\n\nWe'd love to collaborate with you on the \
                 {} campaign for {}. Budget: ${}\n\nBest regards,\nInfluencerFlow",
                target.name,
                target.platform,
                target.niche,
                campaign.title,
                campaign.brand,
                target.rate
            ),
            personalized_elements: vec![
                format!("{} expertise", target.niche),
                format!("{} followers", target.followers),
            ],
        }
    }
}

#[async_trait]
impl Agent for OutreachAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Outreach
    }

    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    async fn execute(&mut self, task: &Task) -> Result<serde_json::Value> {
        let request: OutreachRequest = decode_payload(task)?;
        let latency = self.core.latency();
        let mut outreach_results = Vec::with_capacity(request.creators.len());

        for target in &request.creators {
            latency.pause(COMPOSE_MS).await;
            let message = Self::compose(target, &request.campaign);

            latency.pause(SEND_MS).await;
            let status = if self.core.rng().chance(self.success_rate) {
                DeliveryStatus::Sent
            } else {
                DeliveryStatus::Failed
            };
            debug!(creator = %target.name, status = ?status, subject = %message.subject, "outreach email");

            outreach_results.push(OutreachResult {
                creator_id: target.id.clone(),
                creator_name: target.name.clone(),
                status,
                message: message.subject,
                sent_at: Utc::now(),
            });
        }

        let total = outreach_results.len();
        let sent = outreach_results
            .iter()
            .filter(|r| r.status == DeliveryStatus::Sent)
            .count();
        let report = OutreachReport {
            outreach_results,
            summary: OutreachSummary {
                total,
                sent,
                failed: total - sent,
                expected_responses: expected_responses(sent, self.response_rate),
            },
            message: format!("Outreach sent to {}/{} creators", sent, total),
        };
        Ok(serde_json::to_value(report)?)
    }
}
