use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Orchestration configuration loaded from file and/or environment.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowConfig {
    /// Seed for the simulated outcome generator. `None` draws from entropy.
    pub seed: Option<u64>,
    /// Multiplier applied to every simulated delay. `0.0` disables waiting.
    pub latency_scale: f64,
    /// Probability that a single outreach send goes through.
    pub outreach_success_rate: f64,
    /// Share of sent outreach expected to get a response.
    pub response_rate: f64,
    /// Probability that a simulated charge succeeds.
    pub payment_success_rate: f64,
    /// Size of the synthetic creator pool built by the discovery agent.
    pub creator_pool_size: usize,
    /// Maximum creators returned by one discovery search.
    pub discovery_limit: usize,
    /// Number of top discovered creators contacted per campaign.
    pub outreach_batch: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            seed: None,
            latency_scale: 1.0,
            outreach_success_rate: 0.7,
            response_rate: 0.15,
            payment_success_rate: 0.95,
            creator_pool_size: 50,
            discovery_limit: 10,
            outreach_batch: 5,
        }
    }
}

/// Raw TOML file structure for `~/.config/influencer-flow/config.toml`.
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    seed: Option<u64>,
    latency_scale: Option<f64>,
    outreach_success_rate: Option<f64>,
    response_rate: Option<f64>,
    payment_success_rate: Option<f64>,
    creator_pool_size: Option<usize>,
    discovery_limit: Option<usize>,
    outreach_batch: Option<usize>,
}

/// Default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("influencer-flow").join("config.toml"))
}

impl FlowConfig {
    /// Load configuration from file and environment variables.
    ///
    /// Priority: environment variables override file values, which override
    /// defaults. A missing file is not an error.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let path = config_path.cloned().or_else(default_config_path);

        let file_config = match path {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?;
                toml::from_str::<ConfigFile>(&content)
                    .with_context(|| format!("failed to parse config: {}", path.display()))?
            }
            _ => ConfigFile::default(),
        };

        Self::from_file_and_env(file_config)
    }

    fn from_file_and_env(file_config: ConfigFile) -> Result<Self> {
        Self::from_parts(file_config, |key| std::env::var(key).ok())
    }

    /// Merge file values with overrides from `env`, which maps a variable
    /// name to its raw value.
    fn from_parts<F>(file_config: ConfigFile, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let seed = env_parse::<u64>(&env, "FLOW_SEED")?.or(file_config.seed);
        let latency_scale = env_parse::<f64>(&env, "FLOW_LATENCY_SCALE")?
            .or(file_config.latency_scale)
            .unwrap_or(defaults.latency_scale);
        let outreach_success_rate = env_parse::<f64>(&env, "FLOW_OUTREACH_SUCCESS_RATE")?
            .or(file_config.outreach_success_rate)
            .unwrap_or(defaults.outreach_success_rate);
        let response_rate = env_parse::<f64>(&env, "FLOW_RESPONSE_RATE")?
            .or(file_config.response_rate)
            .unwrap_or(defaults.response_rate);
        let payment_success_rate = env_parse::<f64>(&env, "FLOW_PAYMENT_SUCCESS_RATE")?
            .or(file_config.payment_success_rate)
            .unwrap_or(defaults.payment_success_rate);

        Self {
            seed,
            latency_scale,
            outreach_success_rate,
            response_rate,
            payment_success_rate,
            creator_pool_size: file_config
                .creator_pool_size
                .unwrap_or(defaults.creator_pool_size),
            discovery_limit: file_config
                .discovery_limit
                .unwrap_or(defaults.discovery_limit),
            outreach_batch: file_config.outreach_batch.unwrap_or(defaults.outreach_batch),
        }
        .validated()
    }

    /// Check value ranges after file + env merging.
    pub fn validated(self) -> Result<Self> {
        for (name, rate) in [
            ("outreach_success_rate", self.outreach_success_rate),
            ("response_rate", self.response_rate),
            ("payment_success_rate", self.payment_success_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                bail!("{} must be between 0 and 1, got {}", name, rate);
            }
        }
        if !self.latency_scale.is_finite() || self.latency_scale < 0.0 {
            bail!(
                "latency_scale must be a non-negative number, got {}",
                self.latency_scale
            );
        }
        Ok(self)
    }
}

fn env_parse<T>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("invalid {} value '{}': {}", key, raw, e)),
        None => Ok(None),
    }
}
