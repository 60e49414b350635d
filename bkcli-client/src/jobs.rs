//! Job-related API endpoints

use crate::BuildkiteClient;
use crate::error::Result;
use bkcli_core::domain::build::BuildNumber;
use reqwest::Method;

impl BuildkiteClient {
    // =============================================================================
    // Job Logs
    // =============================================================================

    /// Get the full log of a job as plain text
    ///
    /// # Arguments
    /// * `pipeline` - The pipeline slug
    /// * `build` - The build number
    /// * `job_id` - The job id
    ///
    /// # Returns
    /// The log text as of now; a running job's log keeps growing
    pub async fn get_job_log(
        &self,
        pipeline: &str,
        build: BuildNumber,
        job_id: &str,
    ) -> Result<String> {
        let url = self.job_log_url(pipeline, build, job_id);
        self.request(Method::GET, &url).await
    }
}
