use std::{path::Path, time::Duration};

use reqwest_retry::policies::ExponentialBackoff;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Client settings. Every field has a default, so a config file only needs
/// the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelayClientConfig {
    /// Base url of the relay service, without trailing slash
    pub api_url: String,
    /// Chain id of the chain the sender contract lives on
    pub source_chain: u16,
    pub poll: PollConfig,
    pub retry: RetryConfig,
}

/// Delivery status polling: exponential backoff bounded by a total timeout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PollConfig {
    pub initial_interval_ms: u64,
    pub max_interval_ms: u64,
    pub multiplier: f64,
    pub timeout_secs: u64,
}

/// Retries of transient HTTP failures (connection errors, 5xx, 429). Other
/// failures are returned on the first attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RelayClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_owned(),
            source_chain: 61,
            poll: PollConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        // Bridge finality is on the order of a minute or more.
        Self {
            initial_interval_ms: 2_000,
            max_interval_ms: 30_000,
            multiplier: 2.0,
            timeout_secs: 20 * 60,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 500,
            max_backoff_ms: 5_000,
        }
    }
}

impl RelayClientConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl PollConfig {
    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    pub fn max_interval(&self) -> Duration {
        Duration::from_millis(self.max_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Interval following `current`, capped at the maximum. Multipliers
    /// below 1 (or NaN) keep the interval steady.
    pub fn next_interval(&self, current: Duration) -> Duration {
        let max = self.max_interval();
        let multiplier = if self.multiplier.is_nan() {
            1.0
        } else {
            self.multiplier.max(1.0)
        };
        Duration::try_from_secs_f64(current.as_secs_f64() * multiplier)
            .map_or(max, |next| next.min(max))
    }
}

/// Upper bound on either retry delay, keeping the policy's exponential
/// arithmetic far from `Duration` overflow.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60 * 60);

impl RetryConfig {
    /// Backoff policy for the HTTP client: `max_attempts - 1` retries with
    /// delays between the initial and maximum backoff.
    pub fn policy(&self) -> ExponentialBackoff {
        let max = Duration::from_millis(self.max_backoff_ms).min(MAX_RETRY_DELAY);
        let min = Duration::from_millis(self.initial_backoff_ms).min(max);
        ExponentialBackoff::builder()
            .retry_bounds(min, max)
            .build_with_max_retries(self.max_attempts.saturating_sub(1))
    }
}
