//! Pipeline-related API endpoints

use crate::BuildkiteClient;
use crate::error::Result;
use reqwest::Method;

impl BuildkiteClient {
    /// List the organization's pipelines
    ///
    /// # Returns
    /// The raw response body
    pub async fn list_pipelines(&self) -> Result<String> {
        self.request(Method::GET, &self.pipelines_url()).await
    }
}
