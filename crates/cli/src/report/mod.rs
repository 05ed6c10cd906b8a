// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report rendering.
//!
//! Every format reads the same [`RunSummary`] and [`RunMeta`]; none of them
//! recomputes pass/fail counts.

mod console;
mod html;
mod json;
mod junit;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::aggregate::RunSummary;
use crate::aggregate::markers::strip_ansi;
use crate::cli::OutputFormat;
use crate::config::DEFAULT_TAIL_LINES;
use crate::error::{Error, Result};
use crate::executor::Discipline;

pub use console::{ConsoleFormatter, PerformanceRating};
pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use junit::JunitFormatter;

/// Run metadata rendered alongside the summary.
#[derive(Debug, Clone)]
pub struct RunMeta {
    pub timestamp: DateTime<Utc>,
    pub base_url: String,
    pub mode: String,
    pub discipline: Discipline,
    pub fail_fast: bool,
    /// Tools the selected format would use but that are not installed.
    pub missing_tools: Vec<String>,
    /// Lines of suite output kept in HTML/JUnit tails.
    pub tail_lines: usize,
}

impl RunMeta {
    pub fn new(base_url: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            base_url: base_url.into(),
            mode: mode.into(),
            discipline: Discipline::Sequential,
            fail_fast: false,
            missing_tools: Vec::new(),
            tail_lines: DEFAULT_TAIL_LINES,
        }
    }

    /// Execution description, e.g. "sequential, fail-fast".
    pub fn execution_label(&self) -> String {
        if self.fail_fast && self.discipline == Discipline::Sequential {
            format!("{}, fail-fast", self.discipline.name())
        } else {
            self.discipline.name().to_string()
        }
    }
}

/// Trait for rendering a run summary into one output format.
pub trait ReportFormatter {
    /// Render the report.
    fn format(&self, summary: &RunSummary, meta: &RunMeta) -> anyhow::Result<String>;

    /// Render the report directly to a writer.
    fn format_to(
        &self,
        writer: &mut dyn std::io::Write,
        summary: &RunSummary,
        meta: &RunMeta,
    ) -> anyhow::Result<()> {
        writer.write_all(self.format(summary, meta)?.as_bytes())?;
        Ok(())
    }

    /// File name the report is persisted under.
    fn file_name(&self) -> &'static str;
}

/// Create formatter based on output format.
pub fn create_formatter(format: OutputFormat, compact: bool) -> Box<dyn ReportFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter::new(compact)),
        OutputFormat::Html => Box::new(HtmlFormatter),
        OutputFormat::Junit => Box::new(JunitFormatter),
    }
}

/// Format a report, returning the output string.
pub fn format_report(
    format: OutputFormat,
    summary: &RunSummary,
    meta: &RunMeta,
    compact: bool,
) -> anyhow::Result<String> {
    create_formatter(format, compact).format(summary, meta)
}

/// A report persisted to disk.
#[derive(Debug, Clone)]
pub struct WrittenReport {
    pub path: PathBuf,
    pub content: String,
}

/// Render a report and persist it under `output_dir`.
pub fn write_report(
    format: OutputFormat,
    summary: &RunSummary,
    meta: &RunMeta,
    compact: bool,
    output_dir: &Path,
) -> Result<WrittenReport> {
    let formatter = create_formatter(format, compact);
    let path = output_dir.join(formatter.file_name());
    let content = formatter
        .format(summary, meta)
        .map_err(|e| Error::Internal(format!("cannot render {} report: {e}", format.name())))?;
    std::fs::write(&path, &content).map_err(|source| Error::ReportWrite {
        path: path.clone(),
        source,
    })?;
    tracing::debug!("wrote {} report to {}", format.name(), path.display());
    Ok(WrittenReport { path, content })
}

/// Escape text for embedding in HTML or XML.
///
/// ANSI sequences are removed and control characters XML 1.0 cannot carry
/// are dropped, so the result is safe as element content and attribute value.
pub fn escape_markup(text: &str) -> Cow<'_, str> {
    let plain = strip_ansi(text);
    let needs_escape = plain
        .chars()
        .any(|c| matches!(c, '&' | '<' | '>' | '"' | '\'') || is_disallowed_control(c));
    if !needs_escape {
        return plain;
    }

    let mut out = String::with_capacity(plain.len() + 16);
    for c in plain.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c if is_disallowed_control(c) => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn is_disallowed_control(c: char) -> bool {
    (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r')
}

/// Seconds with millisecond precision, as used in every format.
pub(crate) fn seconds(duration: std::time::Duration) -> String {
    format!("{:.3}", duration.as_secs_f64())
}

#[cfg(test)]
pub mod test_support;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
