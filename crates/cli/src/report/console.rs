// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Console report output.

use std::fmt::Write;

use crate::aggregate::RunSummary;

use super::{ReportFormatter, RunMeta, seconds};

/// Advisory rating of the average response time. Never affects pass/fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceRating {
    Excellent,
    Good,
    Acceptable,
    NeedsAttention,
}

impl PerformanceRating {
    pub fn from_avg_ms(avg_ms: f64) -> Self {
        if avg_ms < 100.0 {
            PerformanceRating::Excellent
        } else if avg_ms < 300.0 {
            PerformanceRating::Good
        } else if avg_ms < 500.0 {
            PerformanceRating::Acceptable
        } else {
            PerformanceRating::NeedsAttention
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PerformanceRating::Excellent => "excellent",
            PerformanceRating::Good => "good",
            PerformanceRating::Acceptable => "acceptable",
            PerformanceRating::NeedsAttention => "needs attention",
        }
    }
}

/// Plain-text summary formatter.
pub struct ConsoleFormatter;

/// Size estimation constants for pre-allocation.
const CONSOLE_HEADER_SIZE: usize = 400;
const CONSOLE_SUITE_SIZE: usize = 80;

impl ReportFormatter for ConsoleFormatter {
    fn format(&self, summary: &RunSummary, meta: &RunMeta) -> anyhow::Result<String> {
        let capacity = CONSOLE_HEADER_SIZE + summary.total_suites() * CONSOLE_SUITE_SIZE;
        let mut output = String::with_capacity(capacity);
        write_summary(&mut output, summary, meta)?;
        Ok(output)
    }

    fn file_name(&self) -> &'static str {
        "report.txt"
    }
}

fn write_summary(out: &mut String, summary: &RunSummary, meta: &RunMeta) -> std::fmt::Result {
    writeln!(out, "Gauntlet Report")?;
    writeln!(out, "===============")?;
    writeln!(out, "Target:  {}", meta.base_url)?;
    writeln!(out, "Mode:    {} ({})", meta.mode, meta.execution_label())?;
    writeln!(
        out,
        "Started: {}",
        meta.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out)?;

    if summary.results().is_empty() {
        writeln!(out, "No suites were run.")?;
    } else {
        let width = summary
            .results()
            .iter()
            .map(|r| r.suite_name.len())
            .max()
            .unwrap_or(0);
        for result in summary.results() {
            let status = if result.passed { "PASS" } else { "FAIL" };
            write!(
                out,
                "{status}  {:<width$}  {:>8}s",
                result.suite_name,
                seconds(result.duration),
            )?;
            if result.total_tests > 0 || result.passed_tests > 0 || result.failed_tests > 0 {
                write!(
                    out,
                    "  tests {} (passed {}, failed {})",
                    result.total_tests, result.passed_tests, result.failed_tests
                )?;
            }
            if !result.passed {
                match result.exit_code {
                    Some(code) => write!(out, "  exit {code}")?,
                    None => write!(out, "  no exit code")?,
                }
            }
            writeln!(out)?;
        }
    }
    writeln!(out)?;

    writeln!(
        out,
        "Suites: {} total, {} passed, {} failed",
        summary.total_suites(),
        summary.passed_suites(),
        summary.failed_suites()
    )?;
    writeln!(
        out,
        "Tests:  {} total, {} passed, {} failed",
        summary.total_tests(),
        summary.passed_tests(),
        summary.failed_tests()
    )?;
    writeln!(out, "Time:   {}s", seconds(summary.total_execution_time()))?;

    if let Some(avg) = summary.average_response_ms() {
        let rating = PerformanceRating::from_avg_ms(avg);
        writeln!(out, "Performance: {} (avg {:.1}ms)", rating.label(), avg)?;
    }

    if summary.failed_suites() > 0 {
        writeln!(out)?;
        writeln!(out, "Failed suites:")?;
        for name in summary.failed_suite_names() {
            writeln!(out, "  - {name}")?;
        }
    }

    if !summary.skipped().is_empty() {
        writeln!(out)?;
        writeln!(out, "Skipped after failure:")?;
        for name in summary.skipped() {
            writeln!(out, "  - {name}")?;
        }
    }

    if !meta.missing_tools.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "Missing tools (reduced detail): {}",
            meta.missing_tools.join(", ")
        )?;
    }

    writeln!(out)?;
    let verdict = if summary.is_success() { "PASSED" } else { "FAILED" };
    writeln!(out, "Result: {verdict}")
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
