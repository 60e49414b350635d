//! Logs command handler
//!
//! Prints the job logs of a build, optionally following running jobs
//! until they finish. Ctrl-C stops a follow cleanly.

use anyhow::Result;
use bkcli_client::BuildkiteApi;
use clap::Args;
use colored::*;
use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::build_resolver::resolve_build;
use crate::follower::{FollowError, LogFollower};
use crate::types::{BuildArgs, parse_duration};

/// Arguments of the `logs` command
#[derive(Debug, Args)]
pub struct LogsArgs {
    #[command(flatten)]
    pub target: BuildArgs,

    /// Keep polling running jobs and print new output as it arrives
    #[arg(short, long)]
    pub follow: bool,

    /// Wait between two polls when following (e.g. 500ms, 2s, 1m)
    #[arg(long, default_value = "2s", value_parser = parse_duration)]
    pub pollrate: Duration,
}

/// Handle the logs command
///
/// In follow mode Ctrl-C stops the follow and the command still succeeds.
/// Without `--follow` the default signal handling is left in place.
///
/// # Arguments
/// * `api` - The API client
/// * `args` - The command arguments
pub async fn handle_logs_command(api: &dyn BuildkiteApi, args: LogsArgs) -> Result<()> {
    let (cancel_tx, cancel_rx) = watch::channel(false);

    if !args.follow {
        return print_build_logs(api, &args, cancel_rx, &mut io::stdout()).await;
    }

    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    let result = print_build_logs(api, &args, cancel_rx, &mut io::stdout()).await;
    ctrl_c.abort();

    if let Err(err) = &result {
        if matches!(err.downcast_ref::<FollowError>(), Some(FollowError::Cancelled)) {
            warn!("Log follow interrupted");
            eprintln!("{}", "Interrupted, stopped following logs.".yellow());
            return Ok(());
        }
    }

    result
}

/// Resolve the build and print its logs to `out`
async fn print_build_logs<W: Write>(
    api: &dyn BuildkiteApi,
    args: &LogsArgs,
    cancel: watch::Receiver<bool>,
    out: &mut W,
) -> Result<()> {
    let pipeline = args.target.pipeline.as_str();

    let selector = args.target.selector();

    let mut watcher = cancel.clone();
    let build = tokio::select! {
        biased;
        Ok(_) = watcher.wait_for(|cancelled| *cancelled) => {
            return Err(FollowError::Cancelled.into());
        }
        build = resolve_build(api, pipeline, &selector) => build?,
    };

    info!(pipeline, build = %build, follow = args.follow, "Printing build logs");

    let follower = LogFollower::new(api, pipeline, build, args.pollrate, cancel);
    if args.follow {
        follower.follow_logs(out).await?;
    } else {
        follower.print_logs(out).await?;
    }

    Ok(())
}
