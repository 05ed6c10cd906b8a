// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON format report output.

use serde_json::json;

use crate::aggregate::RunSummary;

use super::{ReportFormatter, RunMeta};

/// JSON format report formatter.
pub struct JsonFormatter {
    compact: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    ///
    /// If `compact` is true, outputs single-line JSON without whitespace.
    pub fn new(compact: bool) -> Self {
        Self { compact }
    }

    /// Build the JSON value from the summary and run metadata.
    fn build_json(
        &self,
        summary: &RunSummary,
        meta: &RunMeta,
    ) -> anyhow::Result<serde_json::Value> {
        let suites = serde_json::to_value(summary.results())?;
        Ok(json!({
            "timestamp": meta.timestamp.to_rfc3339(),
            "base_url": meta.base_url,
            "test_type": meta.mode,
            "execution": meta.discipline.name(),
            "fail_fast": meta.fail_fast,
            "total_suites": summary.total_suites(),
            "passed_suites": summary.passed_suites(),
            "failed_suites": summary.failed_suites(),
            "total_execution_time": summary.total_execution_time().as_secs_f64(),
            "total_tests": summary.total_tests(),
            "passed_tests": summary.passed_tests(),
            "failed_tests": summary.failed_tests(),
            "average_response_ms": summary.average_response_ms(),
            "skipped_suites": summary.skipped(),
            "missing_tools": meta.missing_tools,
            "test_suites": suites,
        }))
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, summary: &RunSummary, meta: &RunMeta) -> anyhow::Result<String> {
        let value = self.build_json(summary, meta)?;
        if self.compact {
            Ok(serde_json::to_string(&value)?)
        } else {
            Ok(serde_json::to_string_pretty(&value)?)
        }
    }

    fn format_to(
        &self,
        writer: &mut dyn std::io::Write,
        summary: &RunSummary,
        meta: &RunMeta,
    ) -> anyhow::Result<()> {
        let value = self.build_json(summary, meta)?;
        if self.compact {
            serde_json::to_writer(writer, &value)?;
        } else {
            serde_json::to_writer_pretty(writer, &value)?;
        }
        Ok(())
    }

    fn file_name(&self) -> &'static str {
        "report.json"
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
