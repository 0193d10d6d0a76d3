//! usersync CLI entry point.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use usersync_client::cli::Cli;
use usersync_client::commands::{execute, OutputOptions};
use usersync_client::{Config, UsersyncClient};
use usersync_core::mock_data::generate_demo_users;
use usersync_core::remote::InMemoryRemote;

/// Number of users seeded by `--demo`.
const DEMO_USER_COUNT: usize = 23;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "usersync=warn" } else { "usersync=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    let options = OutputOptions {
        format: cli.format,
        quiet: cli.quiet,
    };

    let output = if cli.demo {
        tracing::info!(users = DEMO_USER_COUNT, "Using in-memory demo remote");
        let remote = Arc::new(InMemoryRemote::with_users(generate_demo_users(DEMO_USER_COUNT)));
        execute(cli.command, remote, &config, options).await?
    } else {
        tracing::info!(base_url = %config.base_url, "Using HTTP remote");
        let remote = Arc::new(UsersyncClient::from_config(&config)?);
        execute(cli.command, remote, &config, options).await?
    };

    println!("{output}");
    Ok(())
}
