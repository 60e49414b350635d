//! Pipeline command handler

use anyhow::{Context, Result};
use bkcli_client::BuildkiteApi;

/// List the organization's pipelines
///
/// The response body is printed as returned by the API.
pub async fn list_pipelines(api: &dyn BuildkiteApi) -> Result<()> {
    let body = api
        .list_pipelines()
        .await
        .context("Failed to list pipelines")?;
    println!("{}", body);
    Ok(())
}
