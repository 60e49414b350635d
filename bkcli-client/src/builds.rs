//! Build-related API endpoints

use crate::BuildkiteClient;
use crate::error::{ClientError, Result};
use bkcli_core::domain::build::{Build, BuildNumber, BuildSummary, parse_build_list};
use reqwest::Method;
use tracing::info;

impl BuildkiteClient {
    // =============================================================================
    // Build Listing
    // =============================================================================

    /// List the builds of a pipeline, newest first
    pub async fn list_builds(&self, pipeline: &str) -> Result<Vec<BuildSummary>> {
        let body = self.request(Method::GET, &self.builds_url(pipeline)).await?;
        Ok(parse_build_list(&body)?)
    }

    /// List the builds of a pipeline that ran a given commit, newest first
    ///
    /// # Arguments
    /// * `pipeline` - The pipeline slug
    /// * `commit` - Full or abbreviated commit SHA
    pub async fn list_builds_for_commit(
        &self,
        pipeline: &str,
        commit: &str,
    ) -> Result<Vec<BuildSummary>> {
        let url = self.commit_builds_url(pipeline, commit);
        let body = self.request(Method::GET, &url).await?;
        Ok(parse_build_list(&body)?)
    }

    /// Number of the most recent build of a pipeline
    ///
    /// # Errors
    /// `ClientError::NotFound` if the pipeline has no builds yet
    pub async fn latest_build(&self, pipeline: &str) -> Result<BuildNumber> {
        let builds = self.list_builds(pipeline).await?;
        let number = first_number(builds, || {
            format!("no builds found for pipeline '{}'", pipeline)
        })?;

        info!(pipeline, build = %number, "Resolved latest build");
        Ok(number)
    }

    /// Number of the most recent build of a pipeline for a commit
    ///
    /// # Errors
    /// `ClientError::NotFound` if no build ran that commit
    pub async fn build_for_commit(&self, pipeline: &str, commit: &str) -> Result<BuildNumber> {
        let builds = self.list_builds_for_commit(pipeline, commit).await?;
        let number = first_number(builds, || {
            format!(
                "no builds found for commit '{}' in pipeline '{}'",
                commit, pipeline
            )
        })?;

        info!(pipeline, commit, build = %number, "Resolved build for commit");
        Ok(number)
    }

    // =============================================================================
    // Single Build
    // =============================================================================

    /// Get a build with its jobs
    pub async fn get_build(&self, pipeline: &str, build: BuildNumber) -> Result<Build> {
        let body = self.request(Method::GET, &self.build_url(pipeline, build)).await?;
        Ok(Build::from_json(&body)?)
    }

    /// Rebuild an existing build
    ///
    /// The response body (the new build) is discarded.
    pub async fn rebuild(&self, pipeline: &str, build: BuildNumber) -> Result<()> {
        self.request(Method::PUT, &self.rebuild_url(pipeline, build))
            .await?;

        info!(pipeline, build = %build, "Triggered rebuild");
        Ok(())
    }
}

fn first_number(builds: Vec<BuildSummary>, missing: impl FnOnce() -> String) -> Result<BuildNumber> {
    builds
        .first()
        .map(|build| build.number)
        .ok_or_else(|| ClientError::NotFound(missing()))
}
