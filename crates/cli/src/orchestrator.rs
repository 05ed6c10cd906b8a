// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run driver.
//!
//! Moves through `Init -> PrerequisiteCheck -> Execute -> Aggregate -> Report`.
//! A failed pre-flight ends the run before any suite launches and produces no
//! report. The [`RunSummary`] is threaded through the stages by value.

use std::path::PathBuf;
use std::time::Instant;

use crate::aggregate::{self, RunSummary, SuiteResult};
use crate::cli::OutputFormat;
use crate::error::{Error, ExitCode, Result};
use crate::executor::{Discipline, SuiteExecutor, SuiteHandle, SuiteRun};
use crate::prereq::{HttpProbe, PrerequisiteChecker};
use crate::report::{self, RunMeta, WrittenReport};
use crate::suite::{self, SuiteDescriptor};

/// Effective settings for one run, after CLI, environment and config merge.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub target_url: String,
    pub mode: String,
    pub discipline: Discipline,
    /// Stop after the first failing suite. Sequential only.
    pub fail_fast: bool,
    pub format: OutputFormat,
    pub compact: bool,
    pub tail_lines: usize,
    pub output_dir: PathBuf,
}

/// Run stages, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    PrerequisiteCheck,
    Execute,
    Aggregate,
    Report,
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub meta: RunMeta,
    pub report: WrittenReport,
    pub exit_code: ExitCode,
}

type ResultCallback = Box<dyn FnMut(&SuiteResult)>;

/// Drives one run from pre-flight to report.
pub struct Orchestrator {
    options: RunOptions,
    checker: PrerequisiteChecker,
    executor: SuiteExecutor,
    on_result: Option<ResultCallback>,
    stage: Stage,
}

impl Orchestrator {
    /// Create an orchestrator probing the target over HTTP.
    pub fn new(options: RunOptions) -> Self {
        let executor = SuiteExecutor::new(&options.target_url, &options.output_dir);
        Self {
            options,
            checker: PrerequisiteChecker::new(Some(Box::new(HttpProbe))),
            executor,
            on_result: None,
            stage: Stage::Init,
        }
    }

    /// Replace the pre-flight checker.
    pub fn with_checker(mut self, checker: PrerequisiteChecker) -> Self {
        self.checker = checker;
        self
    }

    /// Replace the suite executor.
    pub fn with_executor(mut self, executor: SuiteExecutor) -> Self {
        self.executor = executor;
        self
    }

    /// Call `callback` for every suite result as it is aggregated.
    pub fn on_result(mut self, callback: impl FnMut(&SuiteResult) + 'static) -> Self {
        self.on_result = Some(Box::new(callback));
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Execute `suites` in order and write the report.
    pub fn run(mut self, suites: &[SuiteDescriptor]) -> Result<RunOutcome> {
        let start = Instant::now();
        let mut meta = RunMeta::new(&self.options.target_url, &self.options.mode);
        meta.discipline = self.options.discipline;
        meta.fail_fast = self.options.fail_fast;
        meta.tail_lines = self.options.tail_lines;
        suite::check_artifact_stems(suites)?;

        std::fs::create_dir_all(&self.options.output_dir).map_err(|source| Error::Io {
            path: self.options.output_dir.clone(),
            source,
        })?;

        self.transition(Stage::PrerequisiteCheck);
        let readiness = self
            .checker
            .check(&self.options.target_url, self.options.format)?;
        meta.missing_tools = readiness.missing_tools;

        self.transition(Stage::Execute);
        tracing::info!(
            "running {} suite(s) against {} ({})",
            suites.len(),
            self.options.target_url,
            meta.execution_label()
        );
        let summary = match self.options.discipline {
            Discipline::Sequential => self.run_sequential(suites)?,
            Discipline::Concurrent => {
                if self.options.fail_fast {
                    tracing::warn!("fail-fast has no effect with parallel execution");
                }
                self.run_concurrent(suites)?
            }
        };

        self.transition(Stage::Aggregate);
        let summary = summary.finish(start.elapsed());
        tracing::info!(
            "{} of {} suite(s) passed",
            summary.passed_suites(),
            summary.total_suites()
        );

        self.transition(Stage::Report);
        let report = report::write_report(
            self.options.format,
            &summary,
            &meta,
            self.options.compact,
            &self.options.output_dir,
        )?;

        let exit_code = if summary.is_success() {
            ExitCode::Success
        } else {
            ExitCode::SuiteFailed
        };
        Ok(RunOutcome {
            summary,
            meta,
            report,
            exit_code,
        })
    }

    fn transition(&mut self, next: Stage) {
        tracing::debug!("stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }

    fn run_sequential(&mut self, suites: &[SuiteDescriptor]) -> Result<RunSummary> {
        let mut summary = RunSummary::new();
        for (index, suite) in suites.iter().enumerate() {
            let result = aggregate::aggregate(self.executor.run(suite)?);
            self.completed(&result);
            let failed = !result.passed;
            summary.record(result);

            if failed && self.options.fail_fast {
                let remaining = &suites[index + 1..];
                if !remaining.is_empty() {
                    tracing::info!(
                        "fail-fast: {} failed, skipping {} suite(s)",
                        suite.name,
                        remaining.len()
                    );
                }
                for skipped in remaining {
                    summary.record_skipped(&skipped.name);
                }
                break;
            }
        }
        Ok(summary)
    }

    /// Launch every suite, then join them in declaration order.
    fn run_concurrent(&mut self, suites: &[SuiteDescriptor]) -> Result<RunSummary> {
        let mut handles: Vec<SuiteHandle> = Vec::with_capacity(suites.len());
        for suite in suites {
            match self.executor.launch(suite) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    // Reap what already started before bailing out
                    for handle in handles {
                        handle.join();
                    }
                    return Err(e);
                }
            }
        }
        tracing::debug!("launched {} suite(s), joining", handles.len());

        let runs: Vec<SuiteRun> = handles.into_iter().map(SuiteHandle::join).collect();
        let summary = aggregate::aggregate_all(runs);
        for result in summary.results() {
            self.completed(result);
        }
        Ok(summary)
    }

    fn completed(&mut self, result: &SuiteResult) {
        if let Err(e) = aggregate::write_result_file(result, &self.options.output_dir) {
            tracing::warn!("cannot persist result for {}: {}", result.suite_name, e);
        }
        if let Some(callback) = self.on_result.as_mut() {
            callback(result);
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
