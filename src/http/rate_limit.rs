//! Client-side rate limiting
//!
//! IBM Cloud APIs enforce per-account quotas; throttling locally keeps long
//! pagination runs from tripping 429 responses.

use governor::{DefaultDirectRateLimiter, Quota};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;

/// `rate_limit` block of a service config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    pub requests_per_second: u32,
    /// Requests allowed back to back; 0 means the same as `requests_per_second`
    #[serde(default)]
    pub burst_size: u32,
}

impl RateLimiterConfig {
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }

    fn quota(&self) -> Quota {
        let rate = NonZeroU32::new(self.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(rate);
        Quota::per_second(rate).allow_burst(burst)
    }
}

/// Token bucket shared by every request of one client
#[derive(Clone)]
pub(crate) struct RateLimiter(Arc<DefaultDirectRateLimiter>);

impl RateLimiter {
    pub(crate) fn new(config: &RateLimiterConfig) -> Self {
        Self(Arc::new(governor::RateLimiter::direct(config.quota())))
    }

    /// Wait for a permit
    pub(crate) async fn acquire(&self) {
        self.0.until_ready().await;
    }
}
