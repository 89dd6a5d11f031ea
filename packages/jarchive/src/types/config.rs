//! Configuration types for sampling.

use chrono::Duration;

/// Configuration for the sampling engine and its game index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Maximum attempts per sampling call (single clue and whole category).
    ///
    /// Each attempt draws a fresh game id and coordinate. When every attempt
    /// fails, the call aborts with the last failure. Default: 5.
    pub max_attempts: u32,

    /// Age after which the known high-water mark is refetched.
    ///
    /// Default: 1 day.
    pub refresh_interval: Duration,

    /// Fixed RNG seed.
    ///
    /// If None, the generator is seeded from the operating system.
    pub seed: Option<u64>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            refresh_interval: Duration::days(1),
            seed: None,
        }
    }
}

impl SamplerConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attempt budget. Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the index staleness threshold.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Seed the RNG for reproducible draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SamplerConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.refresh_interval, Duration::days(1));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder() {
        let config = SamplerConfig::new()
            .with_max_attempts(0)
            .with_refresh_interval(Duration::hours(6))
            .with_seed(42);

        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.refresh_interval, Duration::hours(6));
        assert_eq!(config.seed, Some(42));
    }
}
