//! Configuration module
//!
//! Resolves the API token and organization once, at startup, into an
//! immutable [`Config`].
//!
//! Precedence for each value is flag / environment variable first, then the
//! selected profile of the profile file (`~/.bkcli/config.toml`):
//!
//! ```toml
//! [default]
//! token = "bkua_..."
//! organization = "my-org"
//!
//! [work]
//! token = "bkua_..."
//! organization = "other-org"
//! ```

use anyhow::{Context, Result};
use bkcli_client::BuildkiteClient;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Buildkite API endpoint (e.g., "https://api.buildkite.com/v2")
    pub api_endpoint: String,

    /// Organization slug
    pub organization: String,

    /// API access token
    pub token: String,

    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
}

/// Raw inputs from flags and environment, before the profile file is consulted
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub api_endpoint: String,
    pub organization: Option<String>,
    pub token: Option<String>,
    pub profile: String,
    pub config_path: Option<PathBuf>,
    pub request_timeout: Duration,
}

/// One section of the profile file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    pub token: Option<String>,
    pub organization: Option<String>,
}

impl Config {
    /// Resolve configuration from flags, environment and profile file
    ///
    /// The profile file is only read when flags and environment do not
    /// already provide both the token and the organization.
    pub fn resolve(sources: ConfigSources) -> Result<Self> {
        let mut token = non_empty(sources.token);
        let mut organization = non_empty(sources.organization);

        if token.is_none() || organization.is_none() {
            let path = match sources.config_path {
                Some(path) => path,
                None => default_config_path()
                    .context("Could not determine home directory for the profile file")?,
            };
            let profile = load_profile(&path, &sources.profile)?;

            token = token.or(non_empty(profile.token));
            organization = organization.or(non_empty(profile.organization));
        }

        let config = Self {
            api_endpoint: sources.api_endpoint,
            organization: organization.context(
                "Buildkite organization is not set (use --organization, BUILDKITE_ORG or the profile)",
            )?,
            token: token
                .context("Buildkite token is not set (use BUILDKITE_TOKEN or the profile)")?,
            request_timeout: sources.request_timeout,
        };
        config.validate()?;

        debug!(
            organization = %config.organization,
            api_endpoint = %config.api_endpoint,
            "Resolved configuration"
        );
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            anyhow::bail!("token cannot be empty");
        }

        if self.organization.trim().is_empty() {
            anyhow::bail!("organization cannot be empty");
        }

        if !self.api_endpoint.starts_with("http://") && !self.api_endpoint.starts_with("https://")
        {
            anyhow::bail!("api_endpoint must start with http:// or https://");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }

    /// Build an API client for this configuration
    pub fn client(&self) -> Result<BuildkiteClient> {
        let http_client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(BuildkiteClient::with_client(
            &self.api_endpoint,
            &self.organization,
            self.token.clone(),
            http_client,
        ))
    }
}

/// Default profile file location, `~/.bkcli/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bkcli").join("config.toml"))
}

/// Load one named profile from a profile file
pub fn load_profile(path: &Path, name: &str) -> Result<Profile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile file {}", path.display()))?;

    let mut profiles: HashMap<String, Profile> = toml::from_str(&content).with_context(|| {
        format!(
            "Failed to parse profile file {} as TOML (values must be quoted, e.g. token = \"...\")",
            path.display()
        )
    })?;

    profiles
        .remove(name)
        .with_context(|| format!("Profile '{}' not found in {}", name, path.display()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
