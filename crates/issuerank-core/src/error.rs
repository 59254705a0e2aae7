// SPDX-License-Identifier: Apache-2.0

//! Error types for issuerank.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Binaries should use `anyhow::Result` for top-level error handling.

use thiserror::Error;

/// Generic detail message for upstream failures.
pub const UPSTREAM_ERROR_MESSAGE: &str = "Error fetching issues from GitHub";

/// Errors that can occur while serving an issue listing.
#[derive(Error, Debug)]
pub enum IssueRankError {
    /// The upstream repository does not exist (404 on the first page).
    #[error("Repository not found")]
    NotFound {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repo: String,
    },

    /// GitHub refused the request (403).
    ///
    /// The message differs depending on whether a credential was supplied.
    #[error("{message}")]
    Forbidden {
        /// Human-readable explanation.
        message: String,
    },

    /// Any other upstream failure, including transport errors and timeouts.
    #[error("{message}")]
    Upstream {
        /// HTTP status code (from upstream, or synthesized for transport failures).
        status: u16,
        /// Human-readable explanation.
        message: String,
    },

    /// Caller-supplied query parameters are outside their declared domain.
    #[error("{message}")]
    Validation {
        /// Human-readable explanation.
        message: String,
    },

    /// Configuration file or environment error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },
}

impl IssueRankError {
    /// Builds a [`IssueRankError::Forbidden`] with the message matching the credential state.
    #[must_use]
    pub fn forbidden(authenticated: bool) -> Self {
        let message = if authenticated {
            "GitHub rejected the configured token (403): the token is invalid or lacks \
             permission to read this repository. This is not a rate limit."
        } else {
            "GitHub API rate limit for unauthenticated requests was likely exceeded (403). \
             Set GITHUB_TOKEN to use authenticated requests with a higher rate limit."
        };
        IssueRankError::Forbidden {
            message: message.to_string(),
        }
    }

    /// Builds a [`IssueRankError::Upstream`] with the generic detail message.
    #[must_use]
    pub fn upstream(status: u16) -> Self {
        IssueRankError::Upstream {
            status,
            message: UPSTREAM_ERROR_MESSAGE.to_string(),
        }
    }

    /// Builds a [`IssueRankError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        IssueRankError::Validation {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for IssueRankError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return IssueRankError::Upstream {
                status: 504,
                message: "Timed out fetching issues from GitHub".to_string(),
            };
        }
        if err.is_decode() {
            return IssueRankError::Upstream {
                status: 502,
                message: "Invalid response from GitHub".to_string(),
            };
        }
        IssueRankError::Upstream {
            status: err.status().map_or(502, |s| s.as_u16()),
            message: UPSTREAM_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<config::ConfigError> for IssueRankError {
    fn from(err: config::ConfigError) -> Self {
        IssueRankError::Config {
            message: err.to_string(),
        }
    }
}
