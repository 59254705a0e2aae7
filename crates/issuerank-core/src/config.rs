// SPDX-License-Identifier: Apache-2.0

//! Configuration management for issuerank.
//!
//! Provides layered configuration from a TOML file and environment variables.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `ISSUERANK_`)
//! 2. Config file: `--config <path>`, or `issuerank.toml` in the working directory
//! 3. Built-in defaults
//!
//! # Examples
//!
//! ```bash
//! # Serve on another port and allow a deployed front-end
//! ISSUERANK_SERVER__PORT=9000 \
//! ISSUERANK_SERVER__CORS_ORIGINS=https://issues.example.com,http://localhost:5173 \
//!     issuerank-server
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::IssueRankError;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "issuerank.toml";

/// Application configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// Issue cache settings.
    pub cache: CacheConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Front-end origins allowed to call the API cross-origin.
    pub cors_origins: Vec<String>,
    /// `max-age` advertised in the `Cache-Control` header of issue listings.
    pub cache_control_max_age_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
            cache_control_max_age_seconds: 180,
        }
    }
}

/// GitHub API settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API root, without trailing slash.
    pub api_base_url: String,
    /// Timeout for a single page request, in seconds.
    pub api_timeout_seconds: u64,
    /// Timeout for fetching every page of one repository, in seconds.
    pub fetch_timeout_seconds: u64,
    /// Page size requested from GitHub (max 100).
    pub per_page: u32,
    /// Optional upper bound on pages followed for one repository.
    ///
    /// Unset by default: pagination runs until no `next` link remains,
    /// bounded only by `fetch_timeout_seconds`.
    pub max_pages: Option<u32>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            api_timeout_seconds: 10,
            fetch_timeout_seconds: 60,
            per_page: 100,
            max_pages: None,
        }
    }
}

impl GitHubConfig {
    /// Per-request timeout.
    #[must_use]
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_seconds)
    }

    /// Whole-fetch timeout.
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

/// Issue cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache fetched issue lists in memory.
    pub enabled: bool,
    /// Entry time-to-live in seconds.
    pub ttl_seconds: u64,
    /// Maximum number of repositories kept.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 600,
            max_entries: 1024,
        }
    }
}

/// Load application configuration.
///
/// Reads `path` if given (it must exist), otherwise [`DEFAULT_CONFIG_FILE`]
/// when present, then applies environment variables. Environment variables
/// use the prefix `ISSUERANK_` and double underscore for nested keys
/// (e.g., `ISSUERANK_GITHUB__API_TIMEOUT_SECONDS`).
///
/// # Errors
///
/// Returns `IssueRankError::Config` if a config source exists but is invalid.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, IssueRankError> {
    let file = match path {
        Some(p) => File::from(p.to_path_buf()).required(true),
        None => File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("ISSUERANK")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
