//! Cross-platform performance reporting.

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

const YOUTUBE_FETCH_MS: u64 = 1000;
const INSTAGRAM_FETCH_MS: u64 = 800;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeAnalytics {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub watch_time: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramAnalytics {
    pub reach: u64,
    pub impressions: u64,
    pub likes: u64,
    pub comments: u64,
    pub saves: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_reach: u64,
    pub total_engagement: u64,
    /// Engagement over reach in percent, two decimal places.
    pub engagement_rate: f64,
    pub platforms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformBreakdown {
    pub youtube: YouTubeAnalytics,
    pub instagram: InstagramAnalytics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiEstimate {
    pub estimated: u32,
    pub confidence: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub summary: ReportSummary,
    pub platform_breakdown: PlatformBreakdown,
    pub roi: RoiEstimate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsRequest {
    campaign_id: String,
}

/// Result document of a performance analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub campaign_id: String,
    pub report: PerformanceReport,
    pub platforms: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub message: String,
}

/// Derive the aggregate summary from both platform sources.
pub fn summarize(youtube: &YouTubeAnalytics, instagram: &InstagramAnalytics) -> ReportSummary {
    let total_reach = youtube.views + instagram.reach;
    let total_engagement = youtube.likes + youtube.comments + instagram.likes + instagram.comments;
    let engagement_rate = if total_reach == 0 {
        0.0
    } else {
        (total_engagement as f64 / total_reach as f64 * 100.0 * 100.0).round() / 100.0
    };
    ReportSummary {
        total_reach,
        total_engagement,
        engagement_rate,
        platforms: 2,
    }
}

pub struct AnalyticsAgent {
    core: AgentCore,
}

impl AnalyticsAgent {
    pub fn new(config: &FlowConfig, rng: SharedRandom) -> Self {
        Self {
            core: AgentCore::new(
                "Performance Analytics Agent",
                "analytics_reporting",
                vec![
                    TaskType::AnalyzePerformance,
                    TaskType::GenerateReports,
                    TaskType::TrackRoi,
                ],
                rng,
                SimulatedLatency::new(config.latency_scale),
            ),
        }
    }

    async fn fetch_youtube(&self, campaign_id: &str) -> YouTubeAnalytics {
        debug!(campaign = %campaign_id, "fetching YouTube analytics");
        self.core.latency().pause(YOUTUBE_FETCH_MS).await;
        let rng = self.core.rng();
        YouTubeAnalytics {
            views: rng.range(10_000, 110_000),
            likes: rng.range(500, 5_500),
            comments: rng.range(100, 1_100),
            shares: rng.range(50, 550),
            watch_time: rng.range(5_000, 55_000),
        }
    }

    async fn fetch_instagram(&self, campaign_id: &str) -> InstagramAnalytics {
        debug!(campaign = %campaign_id, "fetching Instagram insights");
        self.core.latency().pause(INSTAGRAM_FETCH_MS).await;
        let rng = self.core.rng();
        InstagramAnalytics {
            reach: rng.range(8_000, 88_000),
            impressions: rng.range(12_000, 132_000),
            likes: rng.range(400, 4_400),
            comments: rng.range(80, 880),
            saves: rng.range(60, 660),
        }
    }
}

#[async_trait]
impl Agent for AnalyticsAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Analytics
    }

    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        &mut self.core
    }

    async fn execute(&mut self, task: &Task) -> Result<serde_json::Value> {
        let request: AnalyticsRequest = decode_payload(task)?;

        let youtube = self.fetch_youtube(&request.campaign_id).await;
        let instagram = self.fetch_instagram(&request.campaign_id).await;

        let rng = self.core.rng();
        let report = PerformanceReport {
            summary: summarize(&youtube, &instagram),
            platform_breakdown: PlatformBreakdown { youtube, instagram },
            roi: RoiEstimate {
                estimated: rng.range(2, 7) as u32,
                confidence: rng.range(80, 100) as u32,
            },
        };

        let report = AnalyticsReport {
            campaign_id: request.campaign_id,
            report,
            platforms: vec!["YouTube".to_string(), "Instagram".to_string()],
            generated_at: Utc::now(),
            message: "Performance analysis completed".to_string(),
        };
        Ok(serde_json::to_value(report)?)
    }
}
