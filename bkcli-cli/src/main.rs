//! Buildkite CLI
//!
//! Command-line interface for reading build logs and managing builds through
//! the Buildkite REST API.

mod build_resolver;
mod commands;
mod config;
mod follower;
mod types;

#[cfg(test)]
mod testing;

use anyhow::Result;
use bkcli_client::DEFAULT_API_ENDPOINT;
use clap::Parser;
use commands::{Commands, handle_command};
use config::{Config, ConfigSources};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use types::parse_duration;

#[derive(Parser)]
#[command(name = "bkcli", version)]
#[command(about = "Buildkite CLI", long_about = None)]
struct Cli {
    /// Buildkite REST API endpoint
    #[arg(
        long,
        global = true,
        env = "BUILDKITE_API_ENDPOINT",
        default_value = DEFAULT_API_ENDPOINT
    )]
    api_endpoint: String,

    /// Organization slug
    #[arg(short, long, global = true, env = "BUILDKITE_ORG")]
    organization: Option<String>,

    /// API access token
    #[arg(long, global = true, env = "BUILDKITE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Profile to read from the profile file
    #[arg(long, global = true, env = "BKCLI_PROFILE", default_value = "default")]
    profile: String,

    /// Path of the profile file (defaults to ~/.bkcli/config.toml)
    #[arg(long, global = true, env = "BKCLI_CONFIG")]
    config: Option<PathBuf>,

    /// Timeout of each HTTP request (e.g. 500ms, 30s, 1m)
    #[arg(long, global = true, default_value = "30s", value_parser = parse_duration)]
    timeout: Duration,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bkcli=warn,bkcli_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::resolve(ConfigSources {
        api_endpoint: cli.api_endpoint,
        organization: cli.organization,
        token: cli.token,
        profile: cli.profile,
        config_path: cli.config,
        request_timeout: cli.timeout,
    })?;

    handle_command(cli.command, &config).await
}
