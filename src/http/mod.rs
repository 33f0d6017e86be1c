//! HTTP client module
//!
//! The request executor shared by every service operation.
//!
//! # Features
//!
//! - **Automatic Retries**: 429, 5xx, timeouts and connect errors
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Rate Limiting**: Optional token bucket rate limiter using governor
//! - **Authentication**: Integration with the auth module

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::RateLimiterConfig;
