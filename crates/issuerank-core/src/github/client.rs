// SPDX-License-Identifier: Apache-2.0

//! Pagination-aware fetcher for a repository's open issues.
//!
//! Requests the first page with `state=open&per_page=100`, then follows the
//! `rel="next"` link of each response until none is advertised. Pages are
//! fetched strictly in order because each next URL is only known once the
//! previous response arrives.

use std::time::{Duration, Instant};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use super::types::RawIssue;
use super::{API_VERSION_HEADER, GITHUB_ACCEPT, GITHUB_API_VERSION, USER_AGENT, link, ratelimit};
use crate::config::GitHubConfig;
use crate::error::IssueRankError;

/// Characters left unescaped in an owner or repository path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// GitHub REST client for listing issues.
///
/// Holds the HTTP client (with its per-request timeout) and the optional
/// credential for reuse across requests.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base_url: String,
    api_url: Url,
    token: Option<SecretString>,
    per_page: u32,
    max_pages: Option<u32>,
    fetch_timeout: Duration,
}

impl GitHubClient {
    /// Creates a client from configuration and an optional credential.
    ///
    /// # Errors
    ///
    /// Returns `IssueRankError::Config` if `api_base_url` is not a valid URL
    /// or the HTTP client cannot be built.
    pub fn new(config: &GitHubConfig, token: Option<SecretString>) -> crate::Result<Self> {
        let api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        let api_url = Url::parse(&api_base_url).map_err(|e| IssueRankError::Config {
            message: format!("Invalid github.api_base_url '{api_base_url}': {e}"),
        })?;

        let http = Client::builder()
            .timeout(config.api_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| IssueRankError::Config {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            api_base_url,
            api_url,
            token,
            per_page: config.per_page.clamp(1, 100),
            max_pages: config.max_pages.map(|n| n.max(1)),
            fetch_timeout: config.fetch_timeout(),
        })
    }

    /// Whether requests carry a credential.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Whether `url` shares the scheme, host and port of the API base URL.
    fn is_api_url(&self, url: &str) -> bool {
        Url::parse(url).is_ok_and(|u| u.origin() == self.api_url.origin())
    }

    /// URL of the first page of open issues for `owner/repo`.
    #[must_use]
    pub fn issues_url(&self, owner: &str, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}/issues?state=open&per_page={}",
            self.api_base_url,
            utf8_percent_encode(owner, PATH_SEGMENT),
            utf8_percent_encode(repo, PATH_SEGMENT),
            self.per_page
        )
    }

    /// Fetches every open issue (pull requests included) of a repository.
    ///
    /// Issues are returned in page order, then in-page order. Any failure
    /// aborts the whole fetch; no partial result is returned.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the first page returns 404
    /// - `Forbidden` if any page returns 403
    /// - `Upstream` for any other non-200 status, transport failure,
    ///   undecodable body, or timeout
    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    pub async fn fetch_open_issues(&self, owner: &str, repo: &str) -> crate::Result<Vec<RawIssue>> {
        let start = Instant::now();

        let issues = tokio::time::timeout(self.fetch_timeout, self.fetch_all_pages(owner, repo))
            .await
            .map_err(|_| {
                warn!(
                    timeout_secs = self.fetch_timeout.as_secs(),
                    "Fetching issues timed out"
                );
                IssueRankError::Upstream {
                    status: 504,
                    message: "Timed out fetching issues from GitHub".to_string(),
                }
            })??;

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;
        debug!(count = issues.len(), duration_ms, "Fetched open issues");

        Ok(issues)
    }

    async fn fetch_all_pages(&self, owner: &str, repo: &str) -> crate::Result<Vec<RawIssue>> {
        let mut issues = Vec::new();
        let mut url = self.issues_url(owner, repo);
        let mut page: u32 = 1;

        loop {
            let mut request = self
                .http
                .get(&url)
                .header(ACCEPT, GITHUB_ACCEPT)
                .header(API_VERSION_HEADER, GITHUB_API_VERSION);
            if let Some(token) = &self.token {
                if self.is_api_url(&url) {
                    request = request.bearer_auth(token.expose_secret());
                } else {
                    warn!(page, "Next link leaves the API origin; sending it without credentials");
                }
            }

            let response = request.send().await.inspect_err(|e| {
                warn!(page, error = %e, "Request to GitHub failed");
            })?;
            ratelimit::observe(response.headers());

            match response.status() {
                StatusCode::OK => {}
                StatusCode::NOT_FOUND if page == 1 => {
                    debug!("Repository not found");
                    return Err(IssueRankError::NotFound {
                        owner: owner.to_string(),
                        repo: repo.to_string(),
                    });
                }
                StatusCode::FORBIDDEN => {
                    warn!(page, authenticated = self.is_authenticated(), "GitHub returned 403");
                    return Err(IssueRankError::forbidden(self.is_authenticated()));
                }
                status => {
                    warn!(page, status = status.as_u16(), "GitHub returned an error");
                    return Err(IssueRankError::upstream(status.as_u16()));
                }
            }

            let next = link::next_link(response.headers());
            let batch: Vec<RawIssue> = response.json().await.inspect_err(|e| {
                warn!(page, error = %e, "Failed to read issue page");
            })?;
            debug!(page, count = batch.len(), "Fetched issue page");
            issues.extend(batch);

            let Some(next) = next else {
                break;
            };
            if let Some(max_pages) = self.max_pages.filter(|&max| page >= max) {
                warn!(max_pages, "Pagination limit reached");
                return Err(IssueRankError::Upstream {
                    status: 502,
                    message: format!("GitHub pagination exceeded {max_pages} pages"),
                });
            }
            url = next;
            page += 1;
        }

        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GitHubClient {
        let config = GitHubConfig {
            api_base_url: base.to_string(),
            ..GitHubConfig::default()
        };
        GitHubClient::new(&config, None).expect("client")
    }

    #[test]
    fn issues_url_requests_open_state_and_full_pages() {
        assert_eq!(
            client("https://api.github.com").issues_url("octocat", "Hello-World"),
            "https://api.github.com/repos/octocat/Hello-World/issues?state=open&per_page=100"
        );
    }

    #[test]
    fn issues_url_trims_trailing_slash() {
        assert_eq!(
            client("http://127.0.0.1:9999/").issues_url("o", "r.rs"),
            "http://127.0.0.1:9999/repos/o/r.rs/issues?state=open&per_page=100"
        );
    }

    #[test]
    fn issues_url_escapes_path_segments() {
        let url = client("https://api.github.com").issues_url("a/b", "c?d");
        assert_eq!(
            url,
            "https://api.github.com/repos/a%2Fb/c%3Fd/issues?state=open&per_page=100"
        );
    }

    #[test]
    fn per_page_is_clamped() {
        let config = GitHubConfig {
            per_page: 500,
            ..GitHubConfig::default()
        };
        let client = GitHubClient::new(&config, None).expect("client");
        assert!(client.issues_url("o", "r").ends_with("per_page=100"));
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let config = GitHubConfig {
            api_base_url: "not a url".to_string(),
            ..GitHubConfig::default()
        };
        let err = GitHubClient::new(&config, None).expect_err("invalid url");
        assert!(matches!(err, IssueRankError::Config { .. }), "got {err:?}");
    }

    #[test]
    fn api_url_requires_same_origin() {
        let github = client("https://api.github.com");
        assert!(github.is_api_url("https://api.github.com/repos/o/r/issues?page=2"));
        assert!(github.is_api_url("https://API.github.com:443/repositories/1/issues"));
        assert!(!github.is_api_url("https://evil.example/repos/o/r/issues?page=2"));
        assert!(!github.is_api_url("http://api.github.com/repos/o/r/issues"));
        assert!(!github.is_api_url("https://api.github.com:8443/repos/o/r/issues"));
        assert!(!github.is_api_url("https://api.github.com.evil.example/"));
        assert!(!github.is_api_url("/repos/o/r/issues"));

        let local = client("http://127.0.0.1:5000");
        assert!(local.is_api_url("http://127.0.0.1:5000/repos/o/r/issues?page=2"));
        assert!(!local.is_api_url("http://127.0.0.1:50001/repos/o/r/issues"));
    }

    #[test]
    fn authentication_follows_token() {
        let config = GitHubConfig::default();
        assert!(!GitHubClient::new(&config, None).unwrap().is_authenticated());
        let token = SecretString::from("t".to_string());
        assert!(
            GitHubClient::new(&config, Some(token))
                .unwrap()
                .is_authenticated()
        );
    }
}
