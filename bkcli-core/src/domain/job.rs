//! Job domain types

use serde::{Deserialize, Deserializer, Serialize};

/// A job within a build
///
/// `finished_at` is `None` while the job runs. The API reports a running job
/// either with `null` or with an empty string, both map to `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: JobKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub finished_at: Option<String>,
}

/// Kind of job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    #[default]
    Script,
    Waiter,
    Manual,
    Trigger,
    #[serde(other)]
    Unknown,
}

/// State string the API uses for a failed job
pub const FAILED_STATE: &str = "failed";

impl Job {
    /// Whether the job has completed
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Whether the job ended in the `failed` state
    pub fn is_failed(&self) -> bool {
        self.state.as_deref() == Some(FAILED_STATE)
    }

    /// Only script jobs run commands and produce a log
    ///
    /// Waiters, block steps and trigger steps have none; asking for their log
    /// is an API error.
    pub fn has_log(&self) -> bool {
        self.kind == JobKind::Script
    }

    /// Name for display, falling back to the id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
