// SPDX-License-Identifier: Apache-2.0

//! HTTP server for issuerank.
//!
//! Exposes `GET /repos/{owner}/{repo}/issues` over an [`IssueService`],
//! with CORS for the configured browser origins and request tracing.

pub mod auth;
pub mod cli;
pub mod error;
pub mod logging;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use http::{HeaderValue, Method};
use issuerank_core::{AppConfig, IssueCache, IssueService, ServerConfig};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::auth::EnvTokenProvider;

/// Shared state of the request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The listing service.
    pub service: IssueService,
    /// `Cache-Control` value sent with successful listings.
    pub cache_control: HeaderValue,
}

impl AppState {
    /// Creates handler state for `service`.
    #[must_use]
    pub fn new(service: IssueService, config: &ServerConfig) -> Self {
        let cache_control = HeaderValue::from_str(&format!(
            "public, max-age={}",
            config.cache_control_max_age_seconds
        ))
        .unwrap_or_else(|_| HeaderValue::from_static("no-cache"));
        Self {
            service,
            cache_control,
        }
    }
}

/// Builds the CORS layer from the configured origins.
///
/// A single `*` entry allows any origin. Origins that are not valid header
/// values are skipped with a warning.
#[must_use]
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let allow_origin = if config.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}

/// Builds the application router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/repos/{owner}/{repo}/issues", get(routes::list_issues))
        .fallback(routes::not_found)
        .with_state(state)
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// Longest pause between two cache sweeps.
pub const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Sweep period for a cache TTL: once per TTL, between 1 s and [`MAX_SWEEP_INTERVAL`].
#[must_use]
pub fn sweep_interval(ttl_seconds: u64) -> Duration {
    Duration::from_secs(ttl_seconds).clamp(Duration::from_secs(1), MAX_SWEEP_INTERVAL)
}

/// Periodically drops expired cache entries.
///
/// `every` is clamped to `1ms..=MAX_SWEEP_INTERVAL`.
pub fn spawn_cache_sweeper(cache: Arc<dyn IssueCache>, every: Duration) -> JoinHandle<()> {
    let every = every.clamp(Duration::from_millis(1), MAX_SWEEP_INTERVAL);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
        loop {
            ticker.tick().await;
            let removed = cache.evict_expired().await;
            if removed > 0 {
                debug!(removed, "Swept expired cache entries");
            }
        }
    })
}

fn socket_addr(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    // IPv6 literals need brackets
    let addr = if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    };
    Ok(addr.parse()?)
}

/// Runs the HTTP server until Ctrl+C.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let service = IssueService::from_config(&config, &EnvTokenProvider)?;

    let sweeper = config.cache.enabled.then(|| {
        spawn_cache_sweeper(
            Arc::clone(service.cache()),
            sweep_interval(config.cache.ttl_seconds),
        )
    });

    let app = router(AppState::new(service, &config.server), &config.server);

    let addr = socket_addr(&config.server.host, config.server.port)?;
    let listener = TcpListener::bind(addr).await?;
    info!("issuerank server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
            info!("Received Ctrl+C, shutting down gracefully");
        })
        .await?;

    if let Some(handle) = sweeper {
        handle.abort();
    }
    Ok(())
}
