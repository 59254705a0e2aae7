// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # issuerank Core
//!
//! Core library for issuerank: fetch a repository's open GitHub issues,
//! score them for priority and newcomer friendliness, and serve a sorted,
//! paginated window.
//!
//! This crate provides reusable components for:
//! - Paginated GitHub issue fetching (`Link` header following)
//! - Priority and friendliness scoring
//! - Sorting and pagination of scored issues
//! - TTL- and size-bounded caching of fetched issues
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use issuerank_core::{IssueService, ListOptions, TokenProvider, load_config};
//! use secrecy::SecretString;
//!
//! struct Anonymous;
//!
//! impl TokenProvider for Anonymous {
//!     fn github_token(&self) -> Option<SecretString> {
//!         None
//!     }
//! }
//!
//! # async fn example() -> issuerank_core::Result<()> {
//! let config = load_config(None)?;
//! let service = IssueService::from_config(&config, &Anonymous)?;
//!
//! let options = ListOptions::from_params(Some("friendliness"), Some("desc"), Some("5"), None)?;
//! let page = service.list_issues("rust-lang", "rustlings", &options).await?;
//! for issue in &page.issues {
//!     println!("#{} {:.1} {}", issue.number, issue.friendliness_score, issue.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`cache`] - Issue cache trait and implementations
//! - [`config`] - Configuration loading
//! - [`error`] - Error types
//! - [`github`] - GitHub API (fetcher, `Link` parsing, rate limits)
//! - [`issues`] - Assembly, sorting and pagination
//! - [`scoring`] - Priority and friendliness scores
//! - [`service`] - The end-to-end listing operation

// ============================================================================
// Authentication
// ============================================================================

pub use auth::TokenProvider;

// ============================================================================
// Error Handling
// ============================================================================

pub use error::IssueRankError;

/// Convenience Result type for issuerank operations.
///
/// This is equivalent to `std::result::Result<T, IssueRankError>`.
pub type Result<T> = std::result::Result<T, IssueRankError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{AppConfig, CacheConfig, GitHubConfig, ServerConfig, load_config};

// ============================================================================
// Caching
// ============================================================================

pub use cache::{CacheEntry, CacheKey, IssueCache, MemoryCache, NoopCache};

// ============================================================================
// GitHub Integration
// ============================================================================

pub use github::GitHubClient;
pub use github::link::parse_link_header;
pub use github::ratelimit::RateLimitStatus;
pub use github::types::RawIssue;

// ============================================================================
// Scoring and Listing
// ============================================================================

pub use issues::{Direction, IssuesPage, ListOptions, ScoredIssue, SortKey};
pub use scoring::{friendliness_score, priority_score};
pub use service::IssueService;

// ============================================================================
// Modules
// ============================================================================

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod issues;
pub mod scoring;
pub mod service;
