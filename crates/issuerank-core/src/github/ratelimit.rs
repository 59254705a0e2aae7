// SPDX-License-Identifier: Apache-2.0

//! GitHub API rate limit observation.
//!
//! Every REST response carries `x-ratelimit-*` headers; the fetcher reads
//! them to warn before the quota runs out.

use reqwest::header::HeaderMap;
use tracing::{debug, warn};

/// GitHub API rate limit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Number of API calls remaining in the current rate limit window.
    pub remaining: u32,
    /// Total number of API calls allowed in the rate limit window.
    pub limit: u32,
    /// Unix timestamp when the rate limit resets.
    pub reset_at: u64,
}

impl RateLimitStatus {
    /// Reads the status from response headers.
    ///
    /// Returns `None` if any of the three headers is missing or malformed.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        Some(Self {
            remaining: header_number(headers, "x-ratelimit-remaining")?,
            limit: header_number(headers, "x-ratelimit-limit")?,
            reset_at: header_number(headers, "x-ratelimit-reset")?,
        })
    }

    /// Returns true if rate limit is low (remaining < 100).
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.remaining < 100
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

/// Logs the rate limit advertised by a response, warning when it runs low.
pub fn observe(headers: &HeaderMap) {
    let Some(status) = RateLimitStatus::from_headers(headers) else {
        return;
    };

    if status.is_low() {
        warn!(
            remaining = status.remaining,
            limit = status.limit,
            reset_at = status.reset_at,
            "GitHub rate limit running low"
        );
    } else {
        debug!(
            remaining = status.remaining,
            limit = status.limit,
            "GitHub rate limit status"
        );
    }
}
