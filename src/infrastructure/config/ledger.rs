//! Settlement concurrency configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::LedgerSettings;

/// Lock, retry and SQLite busy-wait settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LedgerConfig {
    /// Longest wait for another settlement of the same player (default: 5000).
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
    /// Extra attempts after a balance version conflict (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between attempts, scaled by the attempt number (default: 10).
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// How long SQLite waits on a locked database (default: 5000).
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

const fn default_lock_timeout_ms() -> u64 {
    5000
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    10
}

const fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: default_lock_timeout_ms(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl From<&LedgerConfig> for LedgerSettings {
    fn from(config: &LedgerConfig) -> Self {
        Self {
            lock_timeout: Duration::from_millis(config.lock_timeout_ms),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }
}
