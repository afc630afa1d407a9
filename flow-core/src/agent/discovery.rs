//! Creator discovery over a synthetic creator pool.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{decode_payload, Agent, AgentCore, AgentKind};
use crate::config::FlowConfig;
use crate::error::Result;
use crate::latency::SimulatedLatency;
use crate::random::SharedRandom;
use crate::task::{Task, TaskType};

const NICHES: [&str; 8] = [
    "Tech",
    "Fashion",
    "Food",
    "Travel",
    "Fitness",
    "Gaming",
    "Beauty",
    "Lifestyle",
];
const LOCATIONS: [&str; 5] = ["US", "UK", "India", "Canada", "Australia"];
const PLATFORMS: [Platform; 2] = [Platform::Youtube, Platform::Instagram];

/// Simulated delay of one platform search call.
const PLATFORM_SEARCH_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Instagram,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A creator profile in the discovery pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub id: String,
    pub name: String,
    pub handle: String,
    pub platform: Platform,
    pub niche: String,
    pub followers: u64,
    /// Engagement rate in percent, one decimal place.
    pub engagement: f64,
    pub avg_views: u64,
    pub location: String,
    pub rate: u64,
    /// Relevance score in `[70, 100)`.
    pub score: u32,
}

/// Filters applied to the creator pool. Empty or zero values do not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_followers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl SearchCriteria {
    pub fn matches(&self, creator: &Creator) -> bool {
        if let Some(niche) = self.niche.as_deref().filter(|n| !n.is_empty()) {
            if !creator.niche.eq_ignore_ascii_case(niche) {
                return false;
            }
        }
        if let Some(min) = self.min_followers.filter(|m| *m > 0) {
            if creator.followers < min {
                return false;
            }
        }
        if let Some(max) = self.max_budget.filter(|m| *m > 0.0) {
            if creator.rate as f64 > max {
                return false;
            }
        }
        if let Some(platform) = self.platform.as_deref().filter(|p| !p.is_empty()) {
            if !creator.platform.as_str().eq_ignore_ascii_case(platform) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Deserialize)]
struct DiscoveryRequest {
    #[serde(default)]
    criteria: SearchCriteria,
}

/// Result document of a discovery search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryReport {
    pub creators: Vec<Creator>,
    pub total_found: usize,
    pub search_criteria: SearchCriteria,
    pub platforms: Vec<String>,
    pub message: String,
}

pub struct CreatorDiscoveryAgent {
    core: AgentCore,
    pool: Vec<Creator>,
    limit: usize,
}

impl CreatorDiscoveryAgent {
    pub fn new(config: &FlowConfig, rng: SharedRandom) -> Self {
        let pool = generate_pool(&rng, config.creator_pool_size);
        Self {
            core: AgentCore::new(
                "Creator Discovery Agent",
                "creator_discovery",
                vec![
                    TaskType::DiscoverCreators,
                    TaskType::SearchInfluencers,
                    TaskType::ProfileAnalysis,
                ],
                rng,
                SimulatedLatency::new(config.latency_scale),
            ),
            pool,
            limit: config.discovery_limit,
        }
    }

    /// The synthetic creator pool, fixed at construction.
    pub fn pool(&self) -> &[Creator] {
        &self.pool
    }

    /// Filter the pool and keep the highest-scoring matches.
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<Creator> {
        let mut found: Vec<Creator> = self
            .pool
            .iter()
            .filter(|c| criteria.matches(c))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.score.cmp(&a.score));
        found.truncate(self.limit);
        found
    }
}

fn generate_pool(rng: &SharedRandom, size: usize) -> Vec<Creator> {
    (0..size)
        .map(|i| Creator {
            id: format!("creator_{}", i),
            name: format!("Creator {}", i + 1),
            handle: format!("@creator{}", i + 1),
            platform: PLATFORMS[rng.index(PLATFORMS.len())],
            niche: NICHES[rng.index(NICHES.len())].to_string(),
            followers: rng.range(10_000, 910_000),
            engagement: (rng.range_f64(2.0, 10.0) * 10.0).round() / 10.0,
            avg_views: rng.range(5_000, 55_000),
            location: LOCATIONS[rng.index(LOCATIONS.len())].to_string(),
            rate: rng.range(500, 5_500),
            score: rng.range(70, 100) as u32,
        })
        .collect()
}

#[async_trait]
impl Agent for CreatorDiscoveryAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Discovery
    }

    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    async fn execute(&mut self, task: &Task) -> Result<serde_json::Value> {
        let request: DiscoveryRequest = decode_payload(task)?;
        let latency = self.core.latency();

        debug!(criteria = ?request.criteria, "searching YouTube creators");
        latency.pause(PLATFORM_SEARCH_MS).await;
        debug!(criteria = ?request.criteria, "searching Instagram creators");
        latency.pause(PLATFORM_SEARCH_MS).await;

        let creators = self.search(&request.criteria);
        let total_found = creators.len();
        let report = DiscoveryReport {
            creators,
            total_found,
            search_criteria: request.criteria,
            platforms: vec!["YouTube".to_string(), "Instagram".to_string()],
            message: format!(
                "Found {} relevant creators matching your criteria",
                total_found
            ),
        };
        Ok(serde_json::to_value(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn instant_config() -> FlowConfig {
        FlowConfig {
            latency_scale: 0.0,
            ..FlowConfig::default()
        }
    }

    #[test]
    fn test_pool_size_from_config() {
        let config = FlowConfig {
            creator_pool_size: 12,
            ..instant_config()
        };
        let agent = CreatorDiscoveryAgent::new(&config, SharedRandom::seeded(Some(1)));
        assert_eq!(agent.pool().len(), 12);
        assert_eq!(agent.pool()[0].id, "creator_0");
        assert_eq!(agent.pool()[11].handle, "@creator12");
    }

    #[test]
    fn test_pool_values_in_range() {
        let agent = CreatorDiscoveryAgent::new(&instant_config(), SharedRandom::seeded(Some(3)));
        for creator in agent.pool() {
            assert!((10_000..910_000).contains(&creator.followers));
            assert!((2.0..=10.0).contains(&creator.engagement));
            assert!((5_000..55_000).contains(&creator.avg_views));
            assert!((500..5_500).contains(&creator.rate));
            assert!((70..100).contains(&creator.score));
            assert!(NICHES.contains(&creator.niche.as_str()));
        }
    }

    #[test]
    fn test_constant_pool_is_tech_youtube() {
        let agent = CreatorDiscoveryAgent::new(&instant_config(), SharedRandom::constant(0.0));
        assert!(agent
            .pool()
            .iter()
            .all(|c| c.niche == "Tech" && c.platform == Platform::Youtube));
    }

    #[test]
    fn test_search_filters_and_limits() {
        let agent = CreatorDiscoveryAgent::new(&instant_config(), SharedRandom::seeded(Some(11)));
        let criteria = SearchCriteria {
            niche: Some("tech".to_string()),
            min_followers: Some(100_000),
            max_budget: None,
            platform: Some("youtube".to_string()),
        };

        let found = agent.search(&criteria);
        assert!(found.len() <= 10);
        for creator in &found {
            assert_eq!(creator.niche, "Tech");
            assert_eq!(creator.platform, Platform::Youtube);
            assert!(creator.followers >= 100_000);
        }
        for pair in found.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_max_budget_filter() {
        let agent = CreatorDiscoveryAgent::new(&instant_config(), SharedRandom::seeded(Some(5)));
        let criteria = SearchCriteria {
            max_budget: Some(1_000.0),
            ..SearchCriteria::default()
        };
        assert!(agent.search(&criteria).iter().all(|c| c.rate <= 1_000));
    }

    #[test]
    fn test_empty_criteria_keeps_top_ten() {
        let agent = CreatorDiscoveryAgent::new(&instant_config(), SharedRandom::seeded(Some(8)));
        let found = agent.search(&SearchCriteria::default());
        assert_eq!(found.len(), 10);
        let best = agent.pool().iter().map(|c| c.score).max().unwrap();
        assert_eq!(found[0].score, best);
    }

    #[tokio::test]
    async fn test_execute_report_shape() {
        let mut agent =
            CreatorDiscoveryAgent::new(&instant_config(), SharedRandom::constant(0.0));
        let task = Task::assigned(
            1,
            TaskType::DiscoverCreators,
            json!({"criteria": {"niche": "Tech", "platform": "youtube", "minFollowers": 1000}}),
        );

        let value = agent.execute(&task).await.unwrap();
        assert_eq!(value["totalFound"], 10);
        assert_eq!(value["creators"].as_array().unwrap().len(), 10);
        assert_eq!(value["searchCriteria"]["niche"], "Tech");
        assert_eq!(value["platforms"], json!(["YouTube", "Instagram"]));
    }

    #[tokio::test]
    async fn test_execute_rejects_bad_payload() {
        let mut agent = CreatorDiscoveryAgent::new(&instant_config(), SharedRandom::constant(0.0));
        let task = Task::assigned(
            1,
            TaskType::DiscoverCreators,
            json!({"criteria": {"minFollowers": "lots"}}),
        );
        let err = agent.execute(&task).await.unwrap_err();
        assert!(err.to_string().contains("DISCOVER_CREATORS"));
    }
}
