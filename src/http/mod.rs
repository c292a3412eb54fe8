//! Transport for the Plaza API
//!
//! [`HttpClient`] retries 429, 5xx, timeouts and refused connections with
//! backoff, waits on the optional [`RateLimiter`] and signs each attempt.

mod client;
mod rate_limit;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, HttpResponse, RequestConfig,
    DEFAULT_ACCEPT,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
