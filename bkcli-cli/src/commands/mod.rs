//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod agent;
mod build;
mod logs;
mod pipeline;

pub use logs::LogsArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;
use crate::types::BuildArgs;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the job logs of a build
    Logs(LogsArgs),
    /// List the failed steps of a build
    Failed {
        #[command(flatten)]
        target: BuildArgs,
    },
    /// Rebuild a build (the latest one unless --build or --commit is given)
    Trigger {
        #[command(flatten)]
        target: BuildArgs,
    },
    /// List the organization's agents
    Agents,
    /// List the organization's pipelines
    Pipelines,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
///
/// # Returns
/// Result indicating success or failure
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        Commands::Logs(args) => logs::handle_logs_command(&client, args).await,
        Commands::Failed { target } => build::show_failed_steps(&client, &target).await,
        Commands::Trigger { target } => build::trigger_build(&client, &target).await,
        Commands::Agents => agent::list_agents(&client).await,
        Commands::Pipelines => pipeline::list_pipelines(&client).await,
    }
}
