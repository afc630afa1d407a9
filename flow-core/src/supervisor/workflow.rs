use serde_json::json;
use tracing::info;

use super::Supervisor;
use crate::agent::crm::SYNC_CAMPAIGN_DATA;
use crate::agent::discovery::DiscoveryReport;
use crate::agent::outreach::OutreachReport;
use crate::agent::payment::Milestone;
use crate::campaign::transitions::validate_transition;
use crate::campaign::{CampaignStatus, WorkflowStage, WorkflowStep};
use crate::error::Result;
use crate::task::TaskOutcome;

const DEAL_CREATOR: &str = "Selected Creator";

impl Supervisor {
    /// Run the fixed stage sequence for an active campaign:
    /// discovery, outreach, then contract and payment when any creator is
    /// expected to respond, then analytics and CRM sync.
    ///
    /// Each finished stage is appended to the campaign's workflow. The first
    /// failing stage aborts the rest; finished stages are not rolled back.
    pub(crate) async fn execute_workflow(&mut self, campaign_id: &str) -> Result<()> {
        let campaign = self.campaign_mut(campaign_id)?;
        // A finished campaign has no transition left, so it cannot run again.
        validate_transition(campaign.status, CampaignStatus::Completed)?;
        let campaign = campaign.clone();

        let criteria = &campaign.target_criteria;
        let discovery = self
            .run_stage(
                campaign_id,
                WorkflowStage::Discovery,
                json!({
                    "criteria": {
                        "niche": criteria.niche,
                        "platform": criteria.platform,
                        "minFollowers": criteria.min_followers,
                    }
                }),
            )
            .await?;
        let discovered: DiscoveryReport = serde_json::from_value(discovery.result)?;

        let batch: Vec<_> = discovered
            .creators
            .into_iter()
            .take(self.config.outreach_batch)
            .collect();
        let outreach = self
            .run_stage(
                campaign_id,
                WorkflowStage::Outreach,
                json!({
                    "creators": batch,
                    "campaign": {"title": campaign.title, "brand": campaign.brand},
                }),
            )
            .await?;
        let outreach: OutreachReport = serde_json::from_value(outreach.result)?;

        let responded = outreach.summary.expected_responses;
        if responded > 0 {
            self.run_stage(
                campaign_id,
                WorkflowStage::Contract,
                json!({
                    "dealDetails": {
                        "campaign": campaign.title,
                        "brand": campaign.brand,
                        "creator": DEAL_CREATOR,
                        "deliverables": campaign.deliverables,
                        "amount": campaign.budget / f64::from(responded),
                        "timeline": campaign.timeline,
                        "milestones": ["50% upfront", "50% on completion"],
                    }
                }),
            )
            .await?;

            let milestones = Milestone::split_budget(campaign.budget);
            self.run_stage(
                campaign_id,
                WorkflowStage::Payment,
                json!({
                    "paymentDetails": {
                        "amount": milestones[0].amount,
                        "milestones": milestones,
                    }
                }),
            )
            .await?;
        } else {
            info!(campaign = %campaign_id, "no expected responses, skipping contract and payment");
        }

        self.run_stage(
            campaign_id,
            WorkflowStage::Analytics,
            json!({"campaignId": campaign_id}),
        )
        .await?;

        self.run_stage(
            campaign_id,
            WorkflowStage::Crm,
            json!({
                "action": SYNC_CAMPAIGN_DATA,
                "data": {"campaignId": campaign_id},
            }),
        )
        .await?;

        Ok(())
    }

    async fn run_stage(
        &mut self,
        campaign_id: &str,
        stage: WorkflowStage,
        payload: serde_json::Value,
    ) -> Result<TaskOutcome> {
        let outcome = self.delegate_task(stage.task_type(), payload).await?;
        info!(
            campaign = %campaign_id,
            stage = %stage,
            agent = %outcome.agent_name,
            "stage completed"
        );
        self.campaign_mut(campaign_id)?
            .workflow
            .push(WorkflowStep::completed(stage, outcome.clone()));
        Ok(outcome)
    }
}
