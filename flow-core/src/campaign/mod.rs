pub mod schema;
pub mod transitions;
pub mod validation;

pub use schema::{
    Campaign, CampaignInput, CampaignReceipt, CampaignStatus, TargetCriteria, WorkflowStage,
    WorkflowStep,
};
