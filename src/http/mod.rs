//! HTTP client module
//!
//! Thin wrapper over reqwest used by the feed API.
//!
//! # Features
//!
//! - **Base URL joining**: endpoints are written as paths
//! - **Default headers**: e.g. a session cookie set in the config file
//! - **Rate Limiting**: optional token bucket using governor
//! - **Status classification**: non-2xx responses become `Error::HttpStatus`
//!
//! Requests are never retried automatically; a failed request is reported
//! once and the user decides whether to try again.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
