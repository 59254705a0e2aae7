// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for the issuerank server.

use std::path::PathBuf;

use clap::Parser;
use issuerank_core::AppConfig;

/// Serve scored, sorted and paginated open issues of GitHub repositories.
#[derive(Debug, Parser)]
#[command(name = "issuerank-server", version, about)]
pub struct Cli {
    /// Address to bind (overrides `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides `server.port`)
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Path to a TOML config file (default: ./issuerank.toml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Applies command-line overrides on top of loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
