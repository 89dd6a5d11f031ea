use anyhow::{Context, Result};
use dotenvy::dotenv;
use jarchive::{SamplerConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub archive_base_url: String,
    pub archive_user_agent: String,
    pub fetch_timeout: Duration,
    pub sampler_max_attempts: u32,
    pub index_refresh_hours: u32,
    pub sampler_seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            archive_base_url: lookup("ARCHIVE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            archive_user_agent: lookup("ARCHIVE_USER_AGENT")
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            fetch_timeout: Duration::from_secs(
                lookup("FETCH_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse()
                    .context("FETCH_TIMEOUT_SECS must be a valid number")?,
            ),
            sampler_max_attempts: lookup("SAMPLER_MAX_ATTEMPTS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .context("SAMPLER_MAX_ATTEMPTS must be a valid number")?,
            index_refresh_hours: lookup("INDEX_REFRESH_HOURS")
                .unwrap_or_else(|| "24".to_string())
                .parse()
                .context("INDEX_REFRESH_HOURS must be a non-negative number of hours")?,
            sampler_seed: lookup("SAMPLER_SEED")
                .map(|seed| seed.parse::<u64>())
                .transpose()
                .context("SAMPLER_SEED must be a valid number")?,
        })
    }

    pub fn sampler_config(&self) -> SamplerConfig {
        let config = SamplerConfig::new()
            .with_max_attempts(self.sampler_max_attempts)
            .with_refresh_interval(chrono::Duration::hours(i64::from(self.index_refresh_hours)));

        match self.sampler_seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}
