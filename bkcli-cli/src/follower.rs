//! Log follower
//!
//! Prints the logs of every job of a build. In follow mode, jobs that are
//! still running are polled until they finish and only newly appended lines
//! are printed, like `tail -f`.
//!
//! Jobs are handled strictly one after another, in the order the build
//! detail lists them. A long-running early job holds back the later ones.
//!
//! Polling per running job:
//! 1. print the log fetched so far
//! 2. while the job has not finished and its log is not empty:
//!    print the complete lines added since the previous fetch, re-fetch the
//!    build detail and the log, then wait for the poll interval
//! 3. once the job has finished, print what the last fetch added
//!
//! The lines printed in step 2 always belong to the fetch of the previous
//! iteration, so output trails the server by one poll. Printing resumes from
//! the byte offset already written, so a line split across two fetches comes
//! out once and whole.
//!
//! Every request and every wait is raced against the cancellation signal.

use bkcli_client::{BuildkiteApi, ClientError};
use bkcli_core::domain::build::{Build, BuildNumber};
use bkcli_core::domain::job::Job;
use bkcli_core::domain::log::LogSnapshot;
use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Errors that end a follow
#[derive(Debug, Error)]
pub enum FollowError {
    #[error(transparent)]
    Api(#[from] ClientError),

    #[error("Failed to write log output: {0}")]
    Output(#[from] io::Error),

    #[error("Log follow cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, FollowError>;

/// Prints the job logs of one build
pub struct LogFollower<'a, A: ?Sized> {
    api: &'a A,
    pipeline: &'a str,
    build: BuildNumber,
    poll_interval: Duration,
    cancel: watch::Receiver<bool>,
}

impl<'a, A: BuildkiteApi + ?Sized> LogFollower<'a, A> {
    /// Creates a follower
    ///
    /// # Arguments
    /// * `api` - The API to poll
    /// * `pipeline` - Pipeline slug
    /// * `build` - Build number
    /// * `poll_interval` - Wait between two polls of a running job
    /// * `cancel` - Follow stops with [`FollowError::Cancelled`] once this turns `true`
    pub fn new(
        api: &'a A,
        pipeline: &'a str,
        build: BuildNumber,
        poll_interval: Duration,
        cancel: watch::Receiver<bool>,
    ) -> Self {
        Self {
            api,
            pipeline,
            build,
            poll_interval,
            cancel,
        }
    }

    /// Print every job log once, without polling
    pub async fn print_logs<W: Write>(&self, out: &mut W) -> Result<()> {
        let build = self.fetch_build().await?;
        let mut printer = LogPrinter::new(out);

        for job in build.log_jobs() {
            let log = self.fetch_log(job).await?;
            printer.write(log.text())?;
            printer.end_job()?;
        }

        Ok(())
    }

    /// Print every job log, tailing the jobs that are still running
    pub async fn follow_logs<W: Write>(&self, out: &mut W) -> Result<()> {
        let build = self.fetch_build().await?;
        let mut printer = LogPrinter::new(out);

        for job in build.log_jobs() {
            self.follow_job(job, &mut printer).await?;
            printer.end_job()?;
        }

        Ok(())
    }

    async fn follow_job<W: Write>(
        &self,
        job: &Job,
        printer: &mut LogPrinter<'_, W>,
    ) -> Result<()> {
        let mut log = self.fetch_log(job).await?;

        if job.is_finished() {
            if log.line_count() > 0 {
                printer.write(log.text())?;
            }
            return Ok(());
        }

        info!(job = %job.id, name = job.display_name(), "Following running job");
        printer.write(log.text())?;

        // Bytes of the log already written out
        let mut printed = log.text().len();
        let mut previous_line_count = log.line_count();
        let mut finished = false;

        while !finished {
            if log.line_count() == 0 {
                debug!(job = %job.id, "Log is empty, not following");
                break;
            }

            if log.line_count() != previous_line_count {
                let lines = log.complete_since(printed);
                printer.write(lines)?;
                printed += lines.len();
            }

            finished = self.job_finished(&job.id).await?;
            let fresh = self.fetch_log(job).await?;
            previous_line_count = log.line_count();
            log = fresh;

            if !finished {
                self.wait().await?;
            }
        }

        if finished {
            printer.write(log.since(printed))?;
            info!(job = %job.id, "Job finished");
        }

        Ok(())
    }

    /// Re-fetch the build detail and report whether a job has finished
    ///
    /// A job missing from the refreshed detail is treated as finished.
    async fn job_finished(&self, job_id: &str) -> Result<bool> {
        let build = self.fetch_build().await?;
        match build.jobs.iter().find(|job| job.id == job_id) {
            Some(job) => Ok(job.is_finished()),
            None => {
                warn!(job = %job_id, "Job disappeared from build, stop following");
                Ok(true)
            }
        }
    }

    async fn fetch_build(&self) -> Result<Build> {
        let build = self.api.get_build(self.pipeline, self.build);
        Ok(self.until_cancelled(build).await??)
    }

    /// Fetch a job's log; a log the API does not have reads as empty
    async fn fetch_log(&self, job: &Job) -> Result<LogSnapshot> {
        let log = self.api.get_job_log(self.pipeline, self.build, &job.id);
        match self.until_cancelled(log).await? {
            Ok(text) => Ok(LogSnapshot::new(text)),
            Err(err) if err.is_not_found() => {
                warn!(job = %job.id, name = job.display_name(), "Job has no log");
                Ok(LogSnapshot::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Sleep for the poll interval unless cancelled first
    async fn wait(&self) -> Result<()> {
        self.until_cancelled(tokio::time::sleep(self.poll_interval))
            .await
    }

    /// Run `fut` to completion, or fail with [`FollowError::Cancelled`] as
    /// soon as the cancel flag is set
    async fn until_cancelled<F: Future>(&self, fut: F) -> Result<F::Output> {
        let mut cancel = self.cancel.clone();
        tokio::select! {
            biased;
            Ok(_) = cancel.wait_for(|cancelled| *cancelled) => Err(FollowError::Cancelled),
            output = fut => Ok(output),
        }
    }
}

/// Writes log text and keeps track of line boundaries
struct LogPrinter<'w, W> {
    out: &'w mut W,
    at_line_start: bool,
}

impl<'w, W: Write> LogPrinter<'w, W> {
    fn new(out: &'w mut W) -> Self {
        Self {
            out,
            at_line_start: true,
        }
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        self.at_line_start = text.ends_with('\n');
        Ok(())
    }

    /// Terminate an unfinished last line so the next job starts on its own line
    fn end_job(&mut self) -> io::Result<()> {
        if !self.at_line_start {
            self.write("\n")?;
        }
        Ok(())
    }
}
