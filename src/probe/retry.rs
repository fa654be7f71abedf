use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

use crate::core::constants::{http_status, timeouts};

/// Bounded retry policy with exponential backoff.
///
/// A request gets one initial attempt plus at most `max_retries` retries.
/// The n-th retry waits `backoff * 2^(n-1)`, so a one second base gives
/// 1s, 2s, 4s, ... capped at [`timeouts::MAX_BACKOFF_SECONDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u8,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: crate::core::constants::defaults::RETRIES,
            backoff: Duration::from_millis(timeouts::DEFAULT_RETRY_BACKOFF_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u8, backoff: Duration) -> Self {
        Self {
            max_retries,
            backoff,
        }
    }

    /// Policy that never retries
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Whether a response with this status should be attempted again.
    pub fn is_retryable_status(status: u16) -> bool {
        http_status::RETRYABLE.contains(&status)
    }

    /// Whether another attempt is allowed after `retries_done` retries.
    pub fn can_retry(&self, retries_done: u8) -> bool {
        retries_done < self.max_retries
    }

    /// Sleep before the given retry (1-based).
    pub fn delay_for(&self, retry: u8) -> Duration {
        let exponent = u32::from(retry.saturating_sub(1)).min(31);
        self.backoff
            .saturating_mul(1u32 << exponent)
            .min(Duration::from_secs(timeouts::MAX_BACKOFF_SECONDS))
    }

    /// Sleep before a retry triggered by a response.
    ///
    /// 429 and 503 responses may carry a `Retry-After` header in seconds,
    /// which takes precedence over the computed backoff.
    pub fn delay_for_response(&self, retry: u8, status: u16, headers: &HeaderMap) -> Duration {
        if (status == http_status::TOO_MANY_REQUESTS
            || status == http_status::SERVICE_UNAVAILABLE)
            && let Some(seconds) = retry_after_seconds(headers)
        {
            return Duration::from_secs(seconds.min(timeouts::MAX_BACKOFF_SECONDS));
        }
        self.delay_for(retry)
    }
}

fn retry_after_seconds(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
}
