//! Agent-related API endpoints

use crate::BuildkiteClient;
use crate::error::Result;
use reqwest::Method;

impl BuildkiteClient {
    /// List the organization's agents
    ///
    /// # Returns
    /// The raw response body
    pub async fn list_agents(&self) -> Result<String> {
        self.request(Method::GET, &self.agents_url()).await
    }
}
