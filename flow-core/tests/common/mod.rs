#![allow(dead_code)]

use flow_core::campaign::TargetCriteria;
use flow_core::{AgentKind, CampaignInput, FlowConfig, SharedRandom, Supervisor};

/// Config with every simulated delay disabled.
pub fn instant_config() -> FlowConfig {
    FlowConfig {
        latency_scale: 0.0,
        ..FlowConfig::default()
    }
}

pub fn campaign_input() -> CampaignInput {
    CampaignInput {
        title: "T".to_string(),
        brand: "B".to_string(),
        budget: 1000.0,
        target_criteria: TargetCriteria {
            niche: Some("Tech".to_string()),
            platform: Some("youtube".to_string()),
            min_followers: Some(1000),
        },
        deliverables: "1 post".to_string(),
        timeline: "1 week".to_string(),
    }
}

/// Every roll is 0.0: every send and charge succeeds, every creator is a
/// Tech YouTuber.
pub fn lucky_supervisor() -> Supervisor {
    Supervisor::builder(instant_config())
        .random(SharedRandom::constant(0.0))
        .build()
        .unwrap()
}

/// Like [`lucky_supervisor`] but every outreach send fails.
pub fn silent_outreach_supervisor() -> Supervisor {
    Supervisor::builder(instant_config())
        .random(SharedRandom::constant(0.0))
        .agent_random(AgentKind::Outreach, SharedRandom::constant(0.99))
        .build()
        .unwrap()
}

pub fn supervisor_without(kind: AgentKind) -> Supervisor {
    Supervisor::builder(instant_config())
        .random(SharedRandom::constant(0.0))
        .without(kind)
        .build()
        .unwrap()
}

/// Every charge is declined; all other agents succeed.
pub fn declining_payment_supervisor() -> Supervisor {
    Supervisor::builder(instant_config())
        .random(SharedRandom::constant(0.0))
        .agent_random(AgentKind::Payment, SharedRandom::constant(0.99))
        .build()
        .unwrap()
}
