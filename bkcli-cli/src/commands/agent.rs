//! Agent command handler

use anyhow::{Context, Result};
use bkcli_client::BuildkiteApi;

/// List the organization's agents
///
/// The response body is printed as returned by the API.
pub async fn list_agents(api: &dyn BuildkiteApi) -> Result<()> {
    let body = api.list_agents().await.context("Failed to list agents")?;
    println!("{}", body);
    Ok(())
}
