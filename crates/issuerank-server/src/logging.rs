// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the issuerank server.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Default: info for issuerank and request traces, warn for reqwest
//! issuerank-server
//!
//! # Debug output for troubleshooting pagination and cache behaviour
//! RUST_LOG=issuerank_core=debug,issuerank_server=debug issuerank-server
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "issuerank_core=info,issuerank_server=info,tower_http=info,reqwest=warn";

/// Initialize the logging subsystem.
///
/// Writes human-readable events to stderr, filtered by `RUST_LOG`.
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
