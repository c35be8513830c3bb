//! Retry settings and exponential backoff for vision API calls.

use crate::config::RetryConfig;
use std::time::Duration;

/// Upper bound for a single backoff sleep.
const MAX_BACKOFF_MS: u64 = 30_000;

/// Retry behaviour for a single image.
#[derive(Debug, Clone)]
pub struct RetryOptions {
    /// Total attempts, including the first
    pub attempts: u32,
    /// Base backoff delay in milliseconds
    pub base_delay_ms: u64,
    /// Per-attempt timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryOptions {
    fn from(config: &RetryConfig) -> Self {
        Self {
            attempts: config.attempts,
            base_delay_ms: config.delay_ms,
            timeout_ms: config.timeout_ms,
        }
    }
}

/// Calculate exponential backoff duration for a given attempt index.
///
/// Uses `base_delay * 2^attempt` with a cap at 30 seconds.
pub fn backoff_duration(attempt: u32, base_delay_ms: u64) -> Duration {
    let delay = base_delay_ms.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(delay.min(MAX_BACKOFF_MS))
}
