//! Invoicing and simulated charges.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{decode_payload, prefixed_id, Agent, AgentCore, AgentKind};
use crate::config::FlowConfig;
use crate::error::{FlowError, Result};
use crate::latency::SimulatedLatency;
use crate::random::SharedRandom;
use crate::task::{Task, TaskType};

const INVOICE_MS: u64 = 300;
const CHARGE_MS: u64 = 500;
const VERIFY_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub description: String,
    pub amount: f64,
    pub status: MilestoneStatus,
}

impl Milestone {
    /// Split a budget into an upfront half and a completion half. The
    /// completion amount is the remainder, so the pair always sums to `budget`.
    pub fn split_budget(budget: f64) -> [Milestone; 2] {
        let upfront = budget * 0.5;
        [
            Milestone {
                description: "Upfront payment".to_string(),
                amount: upfront,
                status: MilestoneStatus::Completed,
            },
            Milestone {
                description: "Completion payment".to_string(),
                amount: budget - upfront,
                status: MilestoneStatus::Pending,
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentRequest {
    payment_details: PaymentDetails,
}

/// Result document of a processed payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReport {
    pub invoice_id: String,
    pub payment_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub verified: bool,
    pub milestones: Vec<Milestone>,
    pub next_payment: Option<Milestone>,
    pub message: String,
}

pub struct PaymentAgent {
    core: AgentCore,
    success_rate: f64,
}

impl PaymentAgent {
    pub fn new(config: &FlowConfig, rng: SharedRandom) -> Self {
        Self {
            core: AgentCore::new(
                "Smart Payment Agent",
                "payment_automation",
                vec![
                    TaskType::ProcessPayment,
                    TaskType::VerifyPayment,
                    TaskType::RefundPayment,
                ],
                rng,
                SimulatedLatency::new(config.latency_scale),
            ),
            success_rate: config.payment_success_rate,
        }
    }
}

#[async_trait]
impl Agent for PaymentAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Payment
    }

    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    async fn execute(&mut self, task: &Task) -> Result<serde_json::Value> {
        let request: PaymentRequest = decode_payload(task)?;
        let details = request.payment_details;
        if !details.amount.is_finite() || details.amount < 0.0 {
            return Err(FlowError::InvalidPayload {
                task_type: task.task_type.to_string(),
                reason: format!("payment amount must be non-negative, got {}", details.amount),
            });
        }

        let latency = self.core.latency();
        latency.pause(INVOICE_MS).await;
        let invoice_id = prefixed_id("inv");

        latency.pause(CHARGE_MS).await;
        let payment_id = prefixed_id("pay");
        if !self.core.rng().chance(self.success_rate) {
            return Err(FlowError::PaymentDeclined {
                payment_id,
                amount: details.amount,
            });
        }

        latency.pause(VERIFY_MS).await;
        info!(
            invoice = %invoice_id,
            payment = %payment_id,
            amount = details.amount,
            currency = %details.currency,
            "payment captured"
        );

        let next_payment = details
            .milestones
            .iter()
            .find(|m| m.status == MilestoneStatus::Pending)
            .cloned();
        let report = PaymentReport {
            message: format!("Payment completed for {} {}", details.amount, details.currency),
            invoice_id,
            payment_id,
            amount: details.amount,
            currency: details.currency,
            status: "completed".to_string(),
            verified: true,
            milestones: details.milestones,
            next_payment,
        };
        Ok(serde_json::to_value(report)?)
    }
}
