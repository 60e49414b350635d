//! Build domain types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::job::Job;

/// Build number within a pipeline
///
/// Buildkite numbers builds per pipeline starting at 1. The number is what
/// appears in every build-scoped URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildNumber(pub u64);

impl fmt::Display for BuildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BuildNumber {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(BuildNumber)
    }
}

impl From<u64> for BuildNumber {
    fn from(number: u64) -> Self {
        BuildNumber(number)
    }
}

/// Entry of a build listing (`GET .../builds`)
///
/// Only the number is consumed; listings are ordered newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSummary {
    pub number: BuildNumber,
}

/// Build detail (`GET .../builds/{number}`)
///
/// Only the job list is consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Build {
    #[serde(default)]
    pub jobs: Vec<Job>,
}

impl Build {
    /// Parse a build detail body
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// Jobs that produce a log, in build order
    ///
    /// Waiter, block and trigger jobs are left out.
    pub fn log_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(|job| job.has_log())
    }

    /// Names of the jobs whose state is `failed`, in build order
    ///
    /// Failed jobs without a name are reported by id.
    pub fn failed_job_names(&self) -> Vec<String> {
        self.jobs
            .iter()
            .filter(|job| job.is_failed())
            .map(|job| job.display_name().to_string())
            .collect()
    }
}

/// Parse a build listing body
pub fn parse_build_list(body: &str) -> serde_json::Result<Vec<BuildSummary>> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_list_keeps_order() {
        let body = r#"[{"number": 42, "state": "passed"}, {"number": 41}]"#;
        let numbers: Vec<_> = parse_build_list(body)
            .unwrap()
            .into_iter()
            .map(|build| build.number)
            .collect();
        assert_eq!(numbers, vec![BuildNumber(42), BuildNumber(41)]);
    }

    #[test]
    fn test_parse_build_list_empty_listing() {
        assert!(parse_build_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_build_list_rejects_garbage() {
        assert!(parse_build_list("not json").is_err());
    }

    #[test]
    fn test_build_number_parse_and_display() {
        let number: BuildNumber = " 17 ".parse().unwrap();
        assert_eq!(number, BuildNumber(17));
        assert_eq!(number.to_string(), "17");
        assert!("seventeen".parse::<BuildNumber>().is_err());
    }

    #[test]
    fn test_build_without_jobs() {
        let build = Build::from_json(r#"{"number": 3}"#).unwrap();
        assert!(build.jobs.is_empty());
    }

    #[test]
    fn test_failed_job_names_keep_build_order() {
        let body = r#"{
            "number": 9,
            "jobs": [
                {"id": "a", "name": "lint", "state": "failed"},
                {"id": "b", "name": "test", "state": "passed"},
                {"id": "c", "type": "waiter"},
                {"id": "d", "name": "deploy", "state": "failed"},
                {"id": "e", "state": "failed"}
            ]
        }"#;
        let build = Build::from_json(body).unwrap();
        assert_eq!(build.failed_job_names(), vec!["lint", "deploy", "e"]);
    }

    #[test]
    fn test_log_jobs_skip_jobs_without_log() {
        let body = r#"{"jobs": [
            {"id": "a"},
            {"id": "w", "type": "waiter"},
            {"id": "m", "type": "manual"},
            {"id": "t", "type": "trigger"},
            {"id": "b", "type": "script"}
        ]}"#;
        let build = Build::from_json(body).unwrap();
        let ids: Vec<_> = build.log_jobs().map(|job| job.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
