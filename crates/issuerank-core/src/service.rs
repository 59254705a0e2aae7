// SPDX-License-Identifier: Apache-2.0

//! Issue listing facade.
//!
//! Wires the fetcher, cache, assembler and sort/paginate stage into the
//! single operation the HTTP layer calls:
//!
//! caller request → cache or paginated fetch → assemble + score → sort → slice

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::auth::TokenProvider;
use crate::cache::{CacheKey, IssueCache, MemoryCache, NoopCache};
use crate::config::AppConfig;
use crate::github::GitHubClient;
use crate::issues::{IssuesPage, ListOptions, assemble, sort_and_paginate};

/// Serves scored, sorted and paginated issue listings.
#[derive(Clone)]
pub struct IssueService {
    client: GitHubClient,
    cache: Arc<dyn IssueCache>,
}

impl IssueService {
    /// Creates a service from its parts.
    #[must_use]
    pub fn new(client: GitHubClient, cache: Arc<dyn IssueCache>) -> Self {
        Self { client, cache }
    }

    /// Creates a service from configuration and a credential source.
    ///
    /// Uses a [`MemoryCache`] when caching is enabled, else a [`NoopCache`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig, provider: &dyn TokenProvider) -> crate::Result<Self> {
        let token = provider.github_token();
        if token.is_none() {
            info!("No GitHub token configured; using unauthenticated requests");
        }
        let client = GitHubClient::new(&config.github, token)?;

        let cache: Arc<dyn IssueCache> = if config.cache.enabled {
            Arc::new(MemoryCache::from_config(&config.cache))
        } else {
            Arc::new(NoopCache)
        };

        Ok(Self::new(client, cache))
    }

    /// The cache backing this service.
    #[must_use]
    pub fn cache(&self) -> &Arc<dyn IssueCache> {
        &self.cache
    }

    /// Lists the open issues of `owner/repo`, scored, sorted and paginated.
    ///
    /// # Errors
    ///
    /// Propagates fetch errors (`NotFound`, `Forbidden`, `Upstream`); no
    /// partial page is ever returned.
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, sort_by = %options.sort_by, direction = %options.direction))]
    pub async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        options: &ListOptions,
    ) -> crate::Result<IssuesPage> {
        let start = Instant::now();
        let key = CacheKey::new(owner, repo);

        let raw = if let Some(cached) = self.cache.get(&key).await {
            debug!(count = cached.len(), "Cache hit");
            cached
        } else {
            debug!("Cache miss");
            let fetched = Arc::new(self.client.fetch_open_issues(owner, repo).await?);
            self.cache.set(key, Arc::clone(&fetched)).await;
            fetched
        };

        let page = sort_and_paginate(owner, repo, assemble(&raw), options);

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            total_issues = page.total_issues,
            returned = page.issues.len(),
            duration_ms,
            "Listed issues"
        );

        Ok(page)
    }
}
