//! Campaign supervisor: agent registry, task bookkeeping and the campaign list.
//!
//! All mutating operations take `&mut self`, so one supervisor runs at most
//! one delegation at a time and agent state has a single writer.

pub mod routing;
pub mod status;
mod workflow;

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::agent::{
    Agent, AgentKind, AnalyticsAgent, ContractAgent, CreatorDiscoveryAgent, CrmAgent,
    OutreachAgent, PaymentAgent,
};
use crate::campaign::transitions::validate_transition;
use crate::campaign::validation::validate_input;
use crate::campaign::{Campaign, CampaignInput, CampaignReceipt, CampaignStatus};
use crate::config::FlowConfig;
use crate::error::{FlowError, Result};
use crate::random::SharedRandom;
use crate::task::{Task, TaskOutcome, TaskType};

pub use routing::RoutingTable;
pub use status::{CampaignCounts, SystemStatus, TaskCounts};

/// Construct the built-in agent for a specialty.
pub fn build_agent(kind: AgentKind, config: &FlowConfig, rng: SharedRandom) -> Box<dyn Agent> {
    match kind {
        AgentKind::Discovery => Box::new(CreatorDiscoveryAgent::new(config, rng)),
        AgentKind::Outreach => Box::new(OutreachAgent::new(config, rng)),
        AgentKind::Contract => Box::new(ContractAgent::new(config, rng)),
        AgentKind::Payment => Box::new(PaymentAgent::new(config, rng)),
        AgentKind::Analytics => Box::new(AnalyticsAgent::new(config, rng)),
        AgentKind::Crm => Box::new(CrmAgent::new(config, rng)),
    }
}

/// Assembles a [`Supervisor`] with a chosen agent line-up.
pub struct SupervisorBuilder {
    config: FlowConfig,
    rng: Option<SharedRandom>,
    agent_rng: HashMap<AgentKind, SharedRandom>,
    disabled: HashSet<AgentKind>,
    extra: Vec<Box<dyn Agent>>,
}

impl SupervisorBuilder {
    pub fn new(config: FlowConfig) -> Self {
        Self {
            config,
            rng: None,
            agent_rng: HashMap::new(),
            disabled: HashSet::new(),
            extra: Vec::new(),
        }
    }

    /// Random source shared by every built-in agent without an override.
    /// Defaults to a generator seeded from `config.seed`.
    pub fn random(mut self, rng: SharedRandom) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn agent_random(mut self, kind: AgentKind, rng: SharedRandom) -> Self {
        self.agent_rng.insert(kind, rng);
        self
    }

    /// Leave a built-in agent out of the registry.
    pub fn without(mut self, kind: AgentKind) -> Self {
        self.disabled.insert(kind);
        self
    }

    /// Register an additional agent after the built-in ones.
    pub fn with_agent(mut self, agent: Box<dyn Agent>) -> Self {
        self.extra.push(agent);
        self
    }

    pub fn build(self) -> Result<Supervisor> {
        let shared = self
            .rng
            .unwrap_or_else(|| SharedRandom::seeded(self.config.seed));

        let mut supervisor = Supervisor::empty(self.config);
        for kind in AgentKind::ALL {
            if self.disabled.contains(&kind) {
                debug!(agent = %kind, "agent disabled");
                continue;
            }
            let rng = self
                .agent_rng
                .get(&kind)
                .cloned()
                .unwrap_or_else(|| shared.clone());
            let agent = build_agent(kind, &supervisor.config, rng);
            supervisor.register(agent)?;
        }
        for agent in self.extra {
            supervisor.register(agent)?;
        }
        Ok(supervisor)
    }
}

/// Owns the agents, the task queue, the completed-task log and all campaigns.
pub struct Supervisor {
    config: FlowConfig,
    agents: Vec<Box<dyn Agent>>,
    routing: RoutingTable,
    task_queue: Vec<Task>,
    completed_tasks: Vec<Task>,
    task_counter: u64,
    campaigns: Vec<Campaign>,
}

impl Supervisor {
    /// Supervisor with all six specialists sharing one random source.
    pub fn new(config: FlowConfig) -> Result<Self> {
        SupervisorBuilder::new(config).build()
    }

    pub fn builder(config: FlowConfig) -> SupervisorBuilder {
        SupervisorBuilder::new(config)
    }

    fn empty(config: FlowConfig) -> Self {
        Self {
            config,
            agents: Vec::new(),
            routing: RoutingTable::new(),
            task_queue: Vec::new(),
            completed_tasks: Vec::new(),
            task_counter: 0,
            campaigns: Vec::new(),
        }
    }

    /// Add an agent to the registry. Fails if any of its task types is
    /// already claimed.
    pub fn register(&mut self, agent: Box<dyn Agent>) -> Result<()> {
        let index = self.agents.len();
        let core = agent.core();
        self.routing
            .claim(index, core.name(), core.capabilities())?;
        debug!(
            agent = %core.name(),
            kind = %agent.kind(),
            specialty = %core.specialty(),
            capabilities = core.capabilities().len(),
            "registered agent"
        );
        self.agents.push(agent);
        Ok(())
    }

    /// The agent that would receive a task of this type.
    pub fn agent_for(&self, task_type: &TaskType) -> Option<&dyn Agent> {
        self.routing
            .route(task_type)
            .map(|index| self.agents[index].as_ref())
    }

    pub fn task_queue(&self) -> &[Task] {
        &self.task_queue
    }

    pub fn completed_tasks(&self) -> &[Task] {
        &self.completed_tasks
    }

    pub fn task_counter(&self) -> u64 {
        self.task_counter
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn campaign(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    fn campaign_mut(&mut self, id: &str) -> Result<&mut Campaign> {
        self.campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| FlowError::CampaignNotFound(id.to_string()))
    }

    /// Hand one task to the agent that handles its type.
    ///
    /// The task sits in the queue while the agent works and is removed
    /// whatever the outcome. Only successful tasks reach the completed log.
    pub async fn delegate_task(
        &mut self,
        task_type: TaskType,
        payload: serde_json::Value,
    ) -> Result<TaskOutcome> {
        let Some(index) = self.routing.route(&task_type) else {
            warn!(task_type = %task_type, "no agent available");
            return Err(FlowError::NoAgentAvailable(task_type.to_string()));
        };

        self.task_counter += 1;
        let mut task = Task::assigned(self.task_counter, task_type, payload);
        self.task_queue.push(task.clone());

        let result = self.agents[index].process_task(&task).await;
        self.task_queue.retain(|t| t.id != task.id);

        match result {
            Ok(outcome) => {
                task.complete();
                debug!(
                    task_id = task.id,
                    task_type = %task.task_type,
                    agent = %outcome.agent_name,
                    "task completed"
                );
                self.completed_tasks.push(task);
                Ok(outcome)
            }
            Err(e) => {
                task.fail(e.to_string());
                warn!(
                    task_id = task.id,
                    task_type = %task.task_type,
                    error = %e,
                    "task failed"
                );
                Err(e)
            }
        }
    }

    /// Admit a campaign and run its workflow to completion.
    ///
    /// On failure the campaign is kept with status `failed` and the error
    /// message, and the error is returned.
    pub async fn create_campaign(&mut self, input: CampaignInput) -> Result<CampaignReceipt> {
        validate_input(&input)?;

        let id = format!("campaign_{}", Uuid::new_v4().simple());
        info!(campaign = %id, title = %input.title, brand = %input.brand, "campaign created");
        self.campaigns.push(Campaign::new(id.clone(), input));

        match self.execute_workflow(&id).await {
            Ok(()) => {
                let campaign = self.campaign_mut(&id)?;
                validate_transition(campaign.status, CampaignStatus::Completed)?;
                campaign.status = CampaignStatus::Completed;
                info!(campaign = %id, steps = campaign.workflow.len(), "campaign completed");
                Ok(CampaignReceipt {
                    campaign_id: id,
                    status: "success".to_string(),
                    workflow: campaign.workflow.clone(),
                    message: "Campaign workflow completed successfully".to_string(),
                })
            }
            Err(e) => {
                let campaign = self.campaign_mut(&id)?;
                validate_transition(campaign.status, CampaignStatus::Failed)?;
                campaign.status = CampaignStatus::Failed;
                campaign.error = Some(e.to_string());
                warn!(campaign = %id, error = %e, "campaign failed");
                Err(e)
            }
        }
    }

    pub fn system_status(&self) -> SystemStatus {
        let mut campaigns = CampaignCounts {
            total: self.campaigns.len(),
            ..CampaignCounts::default()
        };
        for campaign in &self.campaigns {
            match campaign.status {
                CampaignStatus::Active => campaigns.active += 1,
                CampaignStatus::Completed => campaigns.completed += 1,
                CampaignStatus::Failed => campaigns.failed += 1,
            }
        }

        SystemStatus {
            agents: self.agents.iter().map(|a| a.core().snapshot()).collect(),
            campaigns,
            tasks: TaskCounts {
                queue: self.task_queue.len(),
                completed: self.completed_tasks.len(),
                total: self.task_counter,
            },
        }
    }
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("agents", &self.agents.len())
            .field("routes", &self.routing.len())
            .field("task_queue", &self.task_queue.len())
            .field("completed_tasks", &self.completed_tasks.len())
            .field("task_counter", &self.task_counter)
            .field("campaigns", &self.campaigns.len())
            .finish()
    }
}
