//! Buildkite HTTP Client
//!
//! A small, typed HTTP client for the Buildkite REST API (v2), scoped to a
//! single organization.
//!
//! Every request carries `Authorization: Bearer <token>` and
//! `Accept: text/plain` (log endpoints then return the raw ANSI log instead
//! of a JSON envelope). Bodies are returned as text and parsed into
//! `bkcli_core` domain types where the caller needs structure.
//!
//! # Example
//!
//! ```no_run
//! use bkcli_client::BuildkiteClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = BuildkiteClient::new("https://api.buildkite.com/v2", "my-org", "token");
//!
//!     let latest = client.latest_build("my-pipeline").await?;
//!     println!("Latest build: {}", latest);
//!     Ok(())
//! }
//! ```

mod agents;
pub mod api;
mod builds;
pub mod error;
mod jobs;
mod pipelines;

// Re-export commonly used types
pub use api::BuildkiteApi;
pub use error::{ClientError, Result};

use bkcli_core::domain::build::BuildNumber;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder};
use tracing::debug;

/// Default Buildkite API endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://api.buildkite.com/v2";

/// HTTP client for the Buildkite REST API
///
/// Endpoints are grouped by resource:
/// - Pipelines (list)
/// - Builds (list, list by commit, detail, rebuild)
/// - Jobs (log)
/// - Agents (list)
#[derive(Debug, Clone)]
pub struct BuildkiteClient {
    /// Organization-scoped base URL (e.g., "https://api.buildkite.com/v2/organizations/my-org")
    base_url: String,
    /// API access token
    token: String,
    /// HTTP client instance
    client: Client,
}

impl BuildkiteClient {
    /// Create a new Buildkite client
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint (e.g., "https://api.buildkite.com/v2")
    /// * `organization` - The organization slug
    /// * `token` - The API access token
    ///
    /// # Example
    /// ```
    /// use bkcli_client::BuildkiteClient;
    ///
    /// let client = BuildkiteClient::new("https://api.buildkite.com/v2", "my-org", "token");
    /// assert_eq!(
    ///     client.base_url(),
    ///     "https://api.buildkite.com/v2/organizations/my-org"
    /// );
    /// ```
    pub fn new(
        endpoint: impl AsRef<str>,
        organization: impl AsRef<str>,
        token: impl Into<String>,
    ) -> Self {
        Self::with_client(endpoint, organization, token, Client::new())
    }

    /// Create a new Buildkite client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use bkcli_client::BuildkiteClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = BuildkiteClient::with_client(
    ///     "https://api.buildkite.com/v2",
    ///     "my-org",
    ///     "token",
    ///     http_client,
    /// );
    /// ```
    pub fn with_client(
        endpoint: impl AsRef<str>,
        organization: impl AsRef<str>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = format!(
            "{}/organizations/{}",
            endpoint.as_ref().trim_end_matches('/'),
            urlencoding::encode(organization.as_ref())
        );
        Self {
            base_url,
            token: token.into(),
            client,
        }
    }

    /// Get the organization-scoped base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Plumbing
    // =============================================================================

    /// Issue an authenticated request and return the response body as text
    ///
    /// Non-2xx responses become `ClientError::ApiError` carrying the body.
    pub async fn request(&self, method: Method, url: &str) -> Result<String> {
        debug!(%method, url, "Sending request");

        let response = self.request_builder(method, url).send().await?;
        self.handle_response(response).await
    }

    /// Prepare a request carrying the token and the plain-text `Accept` header
    fn request_builder(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "text/plain")
    }

    /// Check the status code and read the body
    async fn handle_response(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response.text().await?)
    }

    // =============================================================================
    // URL Construction
    // =============================================================================

    fn pipelines_url(&self) -> String {
        format!("{}/pipelines", self.base_url)
    }

    fn agents_url(&self) -> String {
        format!("{}/agents", self.base_url)
    }

    fn pipeline_url(&self, pipeline: &str) -> String {
        format!("{}/{}", self.pipelines_url(), urlencoding::encode(pipeline))
    }

    fn builds_url(&self, pipeline: &str) -> String {
        format!("{}/builds", self.pipeline_url(pipeline))
    }

    fn commit_builds_url(&self, pipeline: &str, commit: &str) -> String {
        format!(
            "{}?commit={}",
            self.builds_url(pipeline),
            urlencoding::encode(commit)
        )
    }

    fn build_url(&self, pipeline: &str, build: BuildNumber) -> String {
        format!("{}/{}", self.builds_url(pipeline), build)
    }

    fn rebuild_url(&self, pipeline: &str, build: BuildNumber) -> String {
        format!("{}/rebuild", self.build_url(pipeline, build))
    }

    fn job_log_url(&self, pipeline: &str, build: BuildNumber, job_id: &str) -> String {
        format!(
            "{}/jobs/{}/log",
            self.build_url(pipeline, build),
            urlencoding::encode(job_id)
        )
    }
}
