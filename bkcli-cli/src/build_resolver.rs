//! Build resolver module
//!
//! Turns a pipeline plus a [`BuildSelector`] into a concrete build number by
//! querying the API when the selector is not already a number.

use anyhow::{Context, Result};
use bkcli_client::BuildkiteApi;
use bkcli_core::domain::build::BuildNumber;
use tracing::debug;

use crate::types::BuildSelector;

/// Resolve a build selector to a build number
///
/// If the selector is already a number, returns it without a request.
/// Otherwise asks the API for the most recent build, optionally restricted to
/// a commit.
///
/// # Errors
/// Returns an error if:
/// - The pipeline has no builds (or none for the commit)
/// - The API call fails
pub async fn resolve_build<A: BuildkiteApi + ?Sized>(
    api: &A,
    pipeline: &str,
    selector: &BuildSelector,
) -> Result<BuildNumber> {
    let number = match selector {
        BuildSelector::Number(number) => return Ok(*number),
        BuildSelector::Commit(commit) => api
            .build_for_commit(pipeline, commit)
            .await
            .with_context(|| format!("Failed to find a build for commit {}", commit))?,
        BuildSelector::Latest => api
            .latest_build(pipeline)
            .await
            .with_context(|| format!("Failed to find the latest build of {}", pipeline))?,
    };

    debug!(pipeline, %selector, build = %number, "Resolved build");
    Ok(number)
}
