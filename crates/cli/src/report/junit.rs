// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JUnit XML report output.
//!
//! Each suite becomes a `<testsuite>` holding a single `<testcase>`; the
//! parsed counters travel as properties since they are not individually
//! addressable test cases.

use std::fmt::Write;

use crate::aggregate::{RunSummary, SuiteResult};

use super::{ReportFormatter, RunMeta, escape_markup, seconds};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// JUnit XML report formatter.
pub struct JunitFormatter;

impl JunitFormatter {
    fn write_suite(
        out: &mut String,
        result: &SuiteResult,
        tail_lines: usize,
    ) -> std::fmt::Result {
        let name = escape_markup(&result.suite_name);
        let failures = usize::from(!result.passed);
        let time = seconds(result.duration);
        writeln!(
            out,
            r#"  <testsuite name="{name}" tests="1" failures="{failures}" errors="0" skipped="0" time="{time}" timestamp="{}">"#,
            result.started_at.format(TIMESTAMP_FORMAT)
        )?;
        writeln!(out, "    <properties>")?;
        for (key, value) in [
            ("total_tests", result.total_tests),
            ("passed_tests", result.passed_tests),
            ("failed_tests", result.failed_tests),
        ] {
            writeln!(out, r#"      <property name="{key}" value="{value}"/>"#)?;
        }
        writeln!(out, "    </properties>")?;

        if result.passed {
            writeln!(
                out,
                r#"    <testcase name="{name}" classname="gauntlet.{name}" time="{time}"/>"#
            )?;
        } else {
            let message = match result.exit_code {
                Some(code) => format!("suite exited with status {code}"),
                None => "suite did not produce an exit status".to_string(),
            };
            writeln!(
                out,
                r#"    <testcase name="{name}" classname="gauntlet.{name}" time="{time}">"#
            )?;
            writeln!(
                out,
                r#"      <failure message="{message}" type="SuiteFailure">{}</failure>"#,
                escape_markup(result.output_tail(tail_lines))
            )?;
            writeln!(out, "    </testcase>")?;
        }
        writeln!(out, "  </testsuite>")
    }

    fn write_document(
        out: &mut String,
        summary: &RunSummary,
        meta: &RunMeta,
    ) -> std::fmt::Result {
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            out,
            r#"<testsuites name="gauntlet" tests="{}" failures="{}" errors="0" time="{}" timestamp="{}">"#,
            summary.total_suites(),
            summary.failed_suites(),
            seconds(summary.total_execution_time()),
            meta.timestamp.format(TIMESTAMP_FORMAT)
        )?;
        for result in summary.results() {
            Self::write_suite(out, result, meta.tail_lines)?;
        }
        writeln!(out, "</testsuites>")
    }
}

impl ReportFormatter for JunitFormatter {
    fn format(&self, summary: &RunSummary, meta: &RunMeta) -> anyhow::Result<String> {
        let mut output = String::with_capacity(256 + summary.total_suites() * 512);
        Self::write_document(&mut output, summary, meta)?;
        Ok(output)
    }

    fn file_name(&self) -> &'static str {
        "junit.xml"
    }
}

#[cfg(test)]
#[path = "junit_tests.rs"]
mod tests;
