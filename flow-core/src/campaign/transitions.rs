use crate::campaign::schema::CampaignStatus;
use crate::error::{FlowError, Result};

/// Validate a campaign status transition. Campaigns leave `active` exactly
/// once; both outcomes are terminal.
pub fn validate_transition(from: CampaignStatus, to: CampaignStatus) -> Result<()> {
    if valid_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(FlowError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

pub fn valid_transitions(from: CampaignStatus) -> Vec<CampaignStatus> {
    match from {
        CampaignStatus::Active => vec![CampaignStatus::Completed, CampaignStatus::Failed],
        CampaignStatus::Completed | CampaignStatus::Failed => vec![],
    }
}
