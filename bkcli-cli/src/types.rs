//! Common types used across CLI modules

use bkcli_core::domain::build::BuildNumber;
use clap::Args;
use std::fmt;
use std::time::Duration;

/// Which build of a pipeline a command operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildSelector {
    /// Explicit build number
    Number(BuildNumber),
    /// Most recent build that ran this commit
    Commit(String),
    /// Most recent build of the pipeline
    Latest,
}

impl BuildSelector {
    /// Build a selector from the optional `--build` and `--commit` values
    ///
    /// An explicit build number wins over a commit, which wins over latest.
    pub fn from_args(build: Option<BuildNumber>, commit: Option<String>) -> Self {
        match (build, commit) {
            (Some(number), _) => BuildSelector::Number(number),
            (None, Some(commit)) if !commit.trim().is_empty() => {
                BuildSelector::Commit(commit.trim().to_string())
            }
            _ => BuildSelector::Latest,
        }
    }
}

impl fmt::Display for BuildSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildSelector::Number(number) => write!(f, "build #{}", number),
            BuildSelector::Commit(commit) => write!(f, "commit {}", commit),
            BuildSelector::Latest => write!(f, "latest build"),
        }
    }
}

/// Pipeline and build selection shared by build-scoped commands
#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    /// Pipeline slug
    #[arg(short, long)]
    pub pipeline: String,

    /// Build number (takes precedence over --commit)
    #[arg(short, long)]
    pub build: Option<BuildNumber>,

    /// Commit hash; selects the most recent build of that commit
    #[arg(short, long)]
    pub commit: Option<String>,
}

impl BuildArgs {
    pub fn selector(&self) -> BuildSelector {
        BuildSelector::from_args(self.build, self.commit.clone())
    }
}

/// Parse a duration such as `500ms`, `2s`, `1m` or a bare number of seconds
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    let (digits, unit) = match input.find(|c: char| !c.is_ascii_digit()) {
        Some(pos) => input.split_at(pos),
        None => (input, "s"),
    };

    let value: u64 = digits
        .parse()
        .map_err(|_| format!("invalid duration `{}`", input))?;

    let duration = match unit {
        "ms" => Duration::from_millis(value),
        "s" => Duration::from_secs(value),
        "m" => Duration::from_secs(value * 60),
        _ => {
            return Err(format!(
                "invalid duration unit in `{}` (expected ms, s or m)",
                input
            ));
        }
    };

    if duration.is_zero() {
        return Err("duration must be greater than 0".to_string());
    }

    Ok(duration)
}
