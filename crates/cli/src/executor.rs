// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite subprocess execution.
//!
//! Each suite runs as a child process whose stdout and stderr both point at
//! the same suite-scoped log file, so the captured stream keeps the order the
//! child wrote it in. [`SuiteExecutor::launch`] starts the child and returns a
//! [`SuiteHandle`]; [`SuiteHandle::join`] blocks until it exits.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::config::DEFAULT_URL_ENV;
use crate::error::{Error, Result};
use crate::suite::SuiteDescriptor;

/// Environment variable holding the running suite's name.
pub const SUITE_NAME_ENV: &str = "GAUNTLET_SUITE";

/// Environment variable holding the run's output directory.
pub const OUTPUT_DIR_ENV: &str = "GAUNTLET_OUTPUT_DIR";

/// How suites are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Discipline {
    /// One suite at a time, each run to completion.
    #[default]
    Sequential,
    /// Every suite launched up front, then all joined.
    Concurrent,
}

impl Discipline {
    pub fn from_parallel(parallel: bool) -> Self {
        if parallel {
            Discipline::Concurrent
        } else {
            Discipline::Sequential
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Discipline::Sequential => "sequential",
            Discipline::Concurrent => "parallel",
        }
    }
}

/// A completed suite execution.
#[derive(Debug, Clone)]
pub struct SuiteRun {
    pub suite_name: String,
    /// `None` when the suite could not be spawned or was killed by a signal.
    pub exit_code: Option<i32>,
    pub started_at: DateTime<Utc>,
    /// Wall-clock time from launch to join.
    pub duration: Duration,
    /// Interleaved stdout and stderr.
    pub raw_output: String,
    /// Log file holding `raw_output`.
    pub output_file: PathBuf,
}

/// Launches suites against one target.
#[derive(Debug, Clone)]
pub struct SuiteExecutor {
    target_url: String,
    url_env: String,
    output_dir: PathBuf,
    work_dir: Option<PathBuf>,
}

impl SuiteExecutor {
    /// Create an executor writing suite logs into `output_dir`.
    ///
    /// The directory must already exist.
    pub fn new(target_url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_url: target_url.into(),
            url_env: DEFAULT_URL_ENV.to_string(),
            output_dir: output_dir.into(),
            work_dir: None,
        }
    }

    /// Inject the target URL under a different variable name.
    pub fn with_url_env(mut self, url_env: impl Into<String>) -> Self {
        self.url_env = url_env.into();
        self
    }

    /// Run suites from `work_dir` instead of the current directory.
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = Some(work_dir.into());
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the log file a suite's output is captured into.
    pub fn output_file(&self, suite: &SuiteDescriptor) -> PathBuf {
        self.output_dir
            .join(format!("{}_output.log", suite.artifact_stem()))
    }

    /// Start a suite without waiting for it.
    ///
    /// Fails only when the log file cannot be created. A command that cannot
    /// be spawned still yields a handle, which joins to a failed run.
    pub fn launch(&self, suite: &SuiteDescriptor) -> Result<SuiteHandle> {
        let output_file = self.output_file(suite);
        let io_error = |source| Error::Io {
            path: output_file.clone(),
            source,
        };
        let stdout_log = File::create(&output_file).map_err(io_error)?;
        let stderr_log = stdout_log.try_clone().map_err(io_error)?;

        let mut cmd = Command::new(&suite.program);
        cmd.args(&suite.args)
            .env(&self.url_env, &self.target_url)
            .env(SUITE_NAME_ENV, &suite.name)
            .env(OUTPUT_DIR_ENV, &self.output_dir)
            .envs(&suite.env)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout_log))
            .stderr(Stdio::from(stderr_log));
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }

        tracing::debug!("launching suite {}: {}", suite.name, suite.command_line());
        let started_at = Utc::now();
        let start = Instant::now();
        let process = match cmd.spawn() {
            Ok(child) => Process::Running(child),
            Err(e) => {
                tracing::warn!("suite {} failed to start: {}", suite.name, e);
                Process::SpawnFailed(format!(
                    "failed to spawn {}: {e}",
                    suite.program.display()
                ))
            }
        };

        Ok(SuiteHandle {
            suite_name: suite.name.clone(),
            output_file,
            started_at,
            start,
            process,
        })
    }

    /// Run a suite to completion.
    pub fn run(&self, suite: &SuiteDescriptor) -> Result<SuiteRun> {
        Ok(self.launch(suite)?.join())
    }
}

enum Process {
    Running(Child),
    SpawnFailed(String),
}

/// A launched suite. Owns the child process until [`SuiteHandle::join`].
pub struct SuiteHandle {
    suite_name: String,
    output_file: PathBuf,
    started_at: DateTime<Utc>,
    start: Instant,
    process: Process,
}

impl SuiteHandle {
    pub fn suite_name(&self) -> &str {
        &self.suite_name
    }

    /// Block until the suite exits and collect its output.
    pub fn join(self) -> SuiteRun {
        let (exit_code, note) = match self.process {
            Process::Running(mut child) => match child.wait() {
                Ok(status) => {
                    tracing::debug!("suite {} exited: {}", self.suite_name, status);
                    (status.code(), None)
                }
                Err(e) => (None, Some(format!("failed to wait for suite: {e}"))),
            },
            Process::SpawnFailed(message) => (None, Some(message)),
        };
        let duration = self.start.elapsed();

        let mut raw_output = match fs::read(&self.output_file) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                tracing::warn!("cannot read {}: {}", self.output_file.display(), e);
                String::new()
            }
        };

        if let Some(note) = note {
            if !raw_output.is_empty() && !raw_output.ends_with('\n') {
                raw_output.push('\n');
            }
            raw_output.push_str(&note);
            raw_output.push('\n');
            if let Err(e) = fs::write(&self.output_file, &raw_output) {
                tracing::warn!("cannot write {}: {}", self.output_file.display(), e);
            }
        }

        SuiteRun {
            suite_name: self.suite_name,
            exit_code,
            started_at: self.started_at,
            duration,
            raw_output,
            output_file: self.output_file,
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
