//! API trait
//!
//! The operations the CLI needs from Buildkite, as a trait so the build
//! resolver and log follower can be driven by an in-memory fake in tests.

use async_trait::async_trait;
use bkcli_core::domain::build::{Build, BuildNumber};

use crate::BuildkiteClient;
use crate::error::Result;

/// Buildkite operations scoped to one organization
#[async_trait]
pub trait BuildkiteApi: Send + Sync {
    /// Raw body of the pipeline listing
    async fn list_pipelines(&self) -> Result<String>;

    /// Number of the most recent build of a pipeline
    async fn latest_build(&self, pipeline: &str) -> Result<BuildNumber>;

    /// Number of the most recent build of a pipeline for a commit
    async fn build_for_commit(&self, pipeline: &str, commit: &str) -> Result<BuildNumber>;

    /// Build detail with its jobs
    async fn get_build(&self, pipeline: &str, build: BuildNumber) -> Result<Build>;

    /// Full log text of a job
    async fn get_job_log(
        &self,
        pipeline: &str,
        build: BuildNumber,
        job_id: &str,
    ) -> Result<String>;

    /// Rebuild an existing build
    async fn rebuild(&self, pipeline: &str, build: BuildNumber) -> Result<()>;

    /// Raw body of the agent listing
    async fn list_agents(&self) -> Result<String>;
}

#[async_trait]
impl BuildkiteApi for BuildkiteClient {
    async fn list_pipelines(&self) -> Result<String> {
        BuildkiteClient::list_pipelines(self).await
    }

    async fn latest_build(&self, pipeline: &str) -> Result<BuildNumber> {
        BuildkiteClient::latest_build(self, pipeline).await
    }

    async fn build_for_commit(&self, pipeline: &str, commit: &str) -> Result<BuildNumber> {
        BuildkiteClient::build_for_commit(self, pipeline, commit).await
    }

    async fn get_build(&self, pipeline: &str, build: BuildNumber) -> Result<Build> {
        BuildkiteClient::get_build(self, pipeline, build).await
    }

    async fn get_job_log(
        &self,
        pipeline: &str,
        build: BuildNumber,
        job_id: &str,
    ) -> Result<String> {
        BuildkiteClient::get_job_log(self, pipeline, build, job_id).await
    }

    async fn rebuild(&self, pipeline: &str, build: BuildNumber) -> Result<()> {
        BuildkiteClient::rebuild(self, pipeline, build).await
    }

    async fn list_agents(&self) -> Result<String> {
        BuildkiteClient::list_agents(self).await
    }
}
