// SPDX-License-Identifier: Apache-2.0

//! Binary entry point for the issuerank server.

use clap::Parser;
use issuerank_server::cli::Cli;
use issuerank_server::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = issuerank_core::load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    issuerank_server::run(config).await
}
