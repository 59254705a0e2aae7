// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides the paginating issue fetcher, `Link` header parsing, rate limit
//! observation, and the upstream wire types.

pub mod client;
pub mod link;
pub mod ratelimit;
pub mod types;

pub use client::GitHubClient;

/// Media type requested from the GitHub REST API.
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Header selecting the REST API version.
pub const API_VERSION_HEADER: &str = "x-github-api-version";

/// REST API version sent with every request.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// `User-Agent` sent with every request (GitHub rejects requests without one).
pub const USER_AGENT: &str = concat!("issuerank/", env!("CARGO_PKG_VERSION"));
