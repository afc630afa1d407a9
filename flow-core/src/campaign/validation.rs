//! Input checks run before a campaign is admitted.

use crate::campaign::schema::CampaignInput;
use crate::error::{FlowError, Result};

/// Reject inputs the workflow cannot act on.
pub fn validate_input(input: &CampaignInput) -> Result<()> {
    if input.title.trim().is_empty() {
        return Err(FlowError::InvalidCampaign("title must not be empty".to_string()));
    }
    if input.brand.trim().is_empty() {
        return Err(FlowError::InvalidCampaign("brand must not be empty".to_string()));
    }
    if !input.budget.is_finite() || input.budget < 0.0 {
        return Err(FlowError::InvalidCampaign(format!(
            "budget must be a non-negative number, got {}",
            input.budget
        )));
    }
    Ok(())
}
