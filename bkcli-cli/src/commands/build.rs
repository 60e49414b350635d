//! Build command handlers
//!
//! Handles the build-scoped commands other than logs: listing the failed
//! steps of a build and triggering a rebuild.

use anyhow::{Context, Result};
use bkcli_client::BuildkiteApi;
use bkcli_core::domain::build::BuildNumber;
use colored::*;

use crate::build_resolver::resolve_build;
use crate::types::BuildArgs;

/// Print the names of the failed steps of a build, one per line
pub async fn show_failed_steps(api: &dyn BuildkiteApi, target: &BuildArgs) -> Result<()> {
    let build = resolve_build(api, &target.pipeline, &target.selector()).await?;
    let names = failed_steps(api, &target.pipeline, build).await?;

    if names.is_empty() {
        eprintln!(
            "{}",
            format!("No failed steps in build #{}.", build).green()
        );
    }
    for name in names {
        println!("{}", name);
    }

    Ok(())
}

/// Names of the jobs of a build whose state is `failed`, in build order
pub async fn failed_steps(
    api: &dyn BuildkiteApi,
    pipeline: &str,
    build: BuildNumber,
) -> Result<Vec<String>> {
    let detail = api
        .get_build(pipeline, build)
        .await
        .with_context(|| format!("Failed to fetch build #{} of {}", build, pipeline))?;

    Ok(detail.failed_job_names())
}

/// Rebuild the selected build
pub async fn trigger_build(api: &dyn BuildkiteApi, target: &BuildArgs) -> Result<()> {
    let build = rebuild_target(api, target).await?;
    println!(
        "{} Rebuild of {} #{} requested",
        "✓".green(),
        target.pipeline.bold(),
        build
    );
    Ok(())
}

/// Resolve the build to rebuild and trigger the rebuild
async fn rebuild_target(api: &dyn BuildkiteApi, target: &BuildArgs) -> Result<BuildNumber> {
    let build = resolve_build(api, &target.pipeline, &target.selector()).await?;

    api.rebuild(&target.pipeline, build)
        .await
        .with_context(|| format!("Failed to rebuild build #{} of {}", build, target.pipeline))?;

    Ok(build)
}
