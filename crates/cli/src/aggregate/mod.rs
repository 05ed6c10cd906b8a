// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result aggregation.
//!
//! Turns completed [`SuiteRun`]s into immutable [`SuiteResult`]s and folds
//! them into a [`RunSummary`] in declaration order.

pub mod markers;

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::executor::SuiteRun;
use crate::suite::sanitize_name;

/// Structured outcome of one suite.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteResult {
    pub suite_name: String,
    /// True iff the suite exited with status 0.
    pub passed: bool,
    pub exit_code: Option<i32>,
    #[serde(rename = "duration_seconds", serialize_with = "serialize_secs")]
    pub duration: Duration,
    pub total_tests: u64,
    pub passed_tests: u64,
    pub failed_tests: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_response_ms: Option<f64>,
    #[serde(rename = "timestamp")]
    pub started_at: DateTime<Utc>,
    pub output_file: PathBuf,
    #[serde(skip)]
    pub raw_output: String,
}

fn serialize_secs<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

impl SuiteResult {
    pub fn duration_seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    /// The last `max_lines` lines of captured output.
    pub fn output_tail(&self, max_lines: usize) -> &str {
        tail_lines(&self.raw_output, max_lines)
    }
}

/// Slice holding the last `max_lines` lines of `text`.
pub fn tail_lines(text: &str, max_lines: usize) -> &str {
    if max_lines == 0 {
        return "";
    }
    let trimmed = text.trim_end_matches('\n');
    let start = trimmed
        .rmatch_indices('\n')
        .nth(max_lines - 1)
        .map_or(0, |(i, _)| i + 1);
    &trimmed[start..]
}

/// Aggregate of one orchestrator invocation.
///
/// `total_suites() == passed_suites() + failed_suites()` always holds since
/// counts only change through [`RunSummary::record`].
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    results: Vec<SuiteResult>,
    passed_suites: usize,
    failed_suites: usize,
    total_execution_time: Duration,
    skipped: Vec<String>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result after those already recorded.
    pub fn record(&mut self, result: SuiteResult) {
        if result.passed {
            self.passed_suites += 1;
        } else {
            self.failed_suites += 1;
        }
        self.results.push(result);
    }

    /// Note a suite that was selected but never launched (fail-fast).
    pub fn record_skipped(&mut self, suite_name: impl Into<String>) {
        self.skipped.push(suite_name.into());
    }

    /// Set the authoritative wall time of the whole run.
    pub fn finish(mut self, total_execution_time: Duration) -> Self {
        self.total_execution_time = total_execution_time;
        self
    }

    pub fn results(&self) -> &[SuiteResult] {
        &self.results
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn total_suites(&self) -> usize {
        self.results.len()
    }

    pub fn passed_suites(&self) -> usize {
        self.passed_suites
    }

    pub fn failed_suites(&self) -> usize {
        self.failed_suites
    }

    pub fn total_execution_time(&self) -> Duration {
        self.total_execution_time
    }

    pub fn is_success(&self) -> bool {
        self.failed_suites == 0
    }

    pub fn total_tests(&self) -> u64 {
        self.results.iter().map(|r| r.total_tests).sum()
    }

    pub fn passed_tests(&self) -> u64 {
        self.results.iter().map(|r| r.passed_tests).sum()
    }

    pub fn failed_tests(&self) -> u64 {
        self.results.iter().map(|r| r.failed_tests).sum()
    }

    pub fn failed_suite_names(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.suite_name.as_str())
            .collect()
    }

    /// Mean of the average response times reported by suites, if any did.
    pub fn average_response_ms(&self) -> Option<f64> {
        let reported: Vec<f64> = self
            .results
            .iter()
            .filter_map(|r| r.avg_response_ms)
            .collect();
        if reported.is_empty() {
            None
        } else {
            Some(reported.iter().sum::<f64>() / reported.len() as f64)
        }
    }
}

/// Build the result for one completed run.
///
/// Missing markers become zero counters.
pub fn aggregate(run: SuiteRun) -> SuiteResult {
    let counters = markers::scan(&run.raw_output);
    tracing::debug!(
        "suite {}: exit {:?}, markers {:?}",
        run.suite_name,
        run.exit_code,
        counters
    );
    SuiteResult {
        passed: run.exit_code == Some(0),
        suite_name: run.suite_name,
        exit_code: run.exit_code,
        duration: run.duration,
        total_tests: counters.total.unwrap_or(0),
        passed_tests: counters.passed.unwrap_or(0),
        failed_tests: counters.failed.unwrap_or(0),
        avg_response_ms: counters.avg_response_ms,
        started_at: run.started_at,
        output_file: run.output_file,
        raw_output: run.raw_output,
    }
}

/// Fold runs, already in declaration order, into a summary.
///
/// This is the single reducer used once every concurrent suite has been
/// joined.
pub fn aggregate_all(runs: Vec<SuiteRun>) -> RunSummary {
    let mut summary = RunSummary::new();
    for run in runs {
        summary.record(aggregate(run));
    }
    summary
}

/// Persist a result as `<suite>_result.json` in `dir`.
pub fn write_result_file(result: &SuiteResult, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("{}_result.json", sanitize_name(&result.suite_name)));
    let json = serde_json::to_string_pretty(result)
        .map_err(|e| Error::Internal(format!("cannot serialize result: {e}")))?;
    std::fs::write(&path, json).map_err(|e| Error::Io {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
