//! In-memory `BuildkiteApi` for tests
//!
//! Build details and job logs are scripted as sequences: each call returns the
//! next entry, and the last entry keeps being returned once the script runs out.

use async_trait::async_trait;
use bkcli_client::{BuildkiteApi, ClientError, Result};
use bkcli_core::domain::build::{Build, BuildNumber};
use bkcli_core::domain::job::{Job, JobKind};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeApi {
    latest: Option<BuildNumber>,
    commits: HashMap<String, BuildNumber>,
    builds: Mutex<VecDeque<Build>>,
    logs: Mutex<HashMap<String, VecDeque<String>>>,
    missing_logs: HashSet<String>,
    agents: String,
    pipelines: String,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latest_build(mut self, number: BuildNumber) -> Self {
        self.latest = Some(number);
        self
    }

    pub fn with_commit_build(mut self, commit: &str, number: BuildNumber) -> Self {
        self.commits.insert(commit.to_string(), number);
        self
    }

    /// Queue a build detail response
    pub fn with_build(self, jobs: Vec<Job>) -> Self {
        self.builds.lock().unwrap().push_back(Build { jobs });
        self
    }

    /// Script the successive log bodies of a job
    pub fn with_logs(self, job_id: &str, logs: &[&str]) -> Self {
        self.logs.lock().unwrap().insert(
            job_id.to_string(),
            logs.iter().map(|log| log.to_string()).collect(),
        );
        self
    }

    /// Make the log request of a job fail with 404
    pub fn with_missing_log(mut self, job_id: &str) -> Self {
        self.missing_logs.insert(job_id.to_string());
        self
    }

    pub fn with_agents(mut self, body: &str) -> Self {
        self.agents = body.to_string();
        self
    }

    pub fn with_pipelines(mut self, body: &str) -> Self {
        self.pipelines = body.to_string();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Pop the next scripted value, keeping the last one in place
fn next_scripted<T: Clone>(script: &mut VecDeque<T>) -> Option<T> {
    if script.len() > 1 {
        script.pop_front()
    } else {
        script.front().cloned()
    }
}

/// Job that is still running
pub fn running(id: &str) -> Job {
    job(id, None, None)
}

/// Job that finished with the given state
pub fn finished(id: &str, state: &str) -> Job {
    job(id, Some(state), Some("2020-01-01T00:00:00Z"))
}

pub fn job(id: &str, state: Option<&str>, finished_at: Option<&str>) -> Job {
    Job {
        id: id.to_string(),
        kind: JobKind::Script,
        name: Some(format!("{} step", id)),
        state: state.map(str::to_string),
        finished_at: finished_at.map(str::to_string),
    }
}

#[async_trait]
impl BuildkiteApi for FakeApi {
    async fn list_pipelines(&self) -> Result<String> {
        self.record("list_pipelines".to_string());
        Ok(self.pipelines.clone())
    }

    async fn latest_build(&self, pipeline: &str) -> Result<BuildNumber> {
        self.record(format!("latest_build {}", pipeline));
        self.latest
            .ok_or_else(|| ClientError::NotFound(format!("no builds for {}", pipeline)))
    }

    async fn build_for_commit(&self, pipeline: &str, commit: &str) -> Result<BuildNumber> {
        self.record(format!("build_for_commit {} {}", pipeline, commit));
        self.commits
            .get(commit)
            .copied()
            .ok_or_else(|| ClientError::NotFound(format!("no builds for {}", commit)))
    }

    async fn get_build(&self, pipeline: &str, build: BuildNumber) -> Result<Build> {
        self.record(format!("get_build {} {}", pipeline, build));
        let mut builds = self.builds.lock().unwrap();
        next_scripted(&mut builds).ok_or_else(|| ClientError::api_error(404, "build not found"))
    }

    async fn get_job_log(
        &self,
        pipeline: &str,
        build: BuildNumber,
        job_id: &str,
    ) -> Result<String> {
        self.record(format!("get_job_log {} {} {}", pipeline, build, job_id));
        if self.missing_logs.contains(job_id) {
            return Err(ClientError::api_error(404, "No log"));
        }
        let mut logs = self.logs.lock().unwrap();
        Ok(logs
            .get_mut(job_id)
            .and_then(next_scripted)
            .unwrap_or_default())
    }

    async fn rebuild(&self, pipeline: &str, build: BuildNumber) -> Result<()> {
        self.record(format!("rebuild {} {}", pipeline, build));
        Ok(())
    }

    async fn list_agents(&self) -> Result<String> {
        self.record("list_agents".to_string());
        Ok(self.agents.clone())
    }
}
