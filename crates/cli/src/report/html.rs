// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTML format report output.

use std::fmt::Write;

use crate::aggregate::{RunSummary, SuiteResult};

use super::{ReportFormatter, RunMeta, escape_markup, seconds};

/// HTML format report formatter.
pub struct HtmlFormatter;

impl HtmlFormatter {
    /// Generate CSS styles for the report.
    fn css() -> &'static str {
        r#":root {
      --bg: #1a1a2e;
      --card-bg: #16213e;
      --text: #eef;
      --muted: #8892b0;
      --accent: #64ffda;
      --pass: #10b981;
      --fail: #ef4444;
    }
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      background: var(--bg);
      color: var(--text);
      padding: 2rem;
      line-height: 1.6;
    }
    .container { max-width: 1200px; margin: 0 auto; }
    header {
      margin-bottom: 2rem;
      padding-bottom: 1rem;
      border-bottom: 1px solid var(--card-bg);
    }
    h1 { color: var(--accent); font-size: 1.5rem; }
    h2 { font-size: 1.1rem; }
    .meta { color: var(--muted); font-size: 0.875rem; margin-top: 0.5rem; }
    .notice { color: #f59e0b; font-size: 0.875rem; margin-bottom: 1rem; }
    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
      gap: 1rem;
      margin-bottom: 2rem;
    }
    .card {
      background: var(--card-bg);
      padding: 1.5rem;
      border-radius: 8px;
      border-left: 4px solid var(--accent);
    }
    .card.passed { border-color: var(--pass); }
    .card.failed { border-color: var(--fail); }
    .card-title { color: var(--muted); font-size: 0.75rem; text-transform: uppercase; }
    .card-value { font-size: 2rem; font-weight: 600; margin-top: 0.5rem; }
    .suite {
      background: var(--card-bg);
      border-radius: 8px;
      border-left: 4px solid var(--pass);
      padding: 1rem 1.5rem;
      margin-bottom: 1rem;
    }
    .suite.failed { border-color: var(--fail); }
    .suite .stats { color: var(--muted); font-size: 0.875rem; }
    pre {
      background: rgba(0,0,0,0.2);
      padding: 0.75rem;
      margin-top: 0.75rem;
      overflow-x: auto;
      font-size: 0.8rem;
    }"#
    }

    /// Render a metric card.
    fn render_card(
        out: &mut String,
        title: &str,
        value: &str,
        category: &str,
    ) -> std::fmt::Result {
        writeln!(
            out,
            r#"      <div class="card {category}">
        <div class="card-title">{title}</div>
        <div class="card-value">{value}</div>
      </div>"#
        )
    }

    fn render_cards(out: &mut String, summary: &RunSummary) -> std::fmt::Result {
        let verdict = if summary.is_success() { "passed" } else { "failed" };
        Self::render_card(out, "Result", verdict, verdict)?;
        Self::render_card(out, "Suites", &summary.total_suites().to_string(), "")?;
        Self::render_card(
            out,
            "Suites passed",
            &summary.passed_suites().to_string(),
            "passed",
        )?;
        Self::render_card(
            out,
            "Suites failed",
            &summary.failed_suites().to_string(),
            "failed",
        )?;
        Self::render_card(
            out,
            "Tests",
            &format!("{} / {}", summary.passed_tests(), summary.total_tests()),
            "",
        )?;
        Self::render_card(
            out,
            "Time",
            &format!("{}s", seconds(summary.total_execution_time())),
            "",
        )?;
        if let Some(avg) = summary.average_response_ms() {
            Self::render_card(out, "Avg response", &format!("{avg:.1}ms"), "")?;
        }
        Ok(())
    }

    /// Render one suite section with its escaped output tail.
    fn render_suite(
        out: &mut String,
        result: &SuiteResult,
        tail_lines: usize,
    ) -> std::fmt::Result {
        let status = if result.passed { "passed" } else { "failed" };
        let exit = match result.exit_code {
            Some(code) => code.to_string(),
            None => "none".to_string(),
        };
        writeln!(out, r#"    <section class="suite {status}">"#)?;
        writeln!(
            out,
            "      <h2>{} &middot; {status}</h2>",
            escape_markup(&result.suite_name)
        )?;
        writeln!(
            out,
            r#"      <div class="stats">exit {exit} &middot; {}s &middot; tests {} (passed {}, failed {})</div>"#,
            seconds(result.duration),
            result.total_tests,
            result.passed_tests,
            result.failed_tests,
        )?;
        let tail = result.output_tail(tail_lines);
        if !tail.is_empty() {
            writeln!(out, "      <pre>{}</pre>", escape_markup(tail))?;
        }
        writeln!(out, "    </section>")
    }

    fn render_document(
        out: &mut String,
        summary: &RunSummary,
        meta: &RunMeta,
    ) -> std::fmt::Result {
        let css = Self::css();
        let base_url = escape_markup(&meta.base_url);
        let mode = escape_markup(&meta.mode);
        let date = meta.timestamp.format("%Y-%m-%d %H:%M:%S UTC");
        let execution = meta.execution_label();
        write!(
            out,
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Gauntlet Report</title>
  <style>
    {css}
  </style>
</head>
<body>
  <div class="container">
    <header>
      <h1>Gauntlet Report</h1>
      <div class="meta">Target: {base_url} &middot; Mode: {mode} ({execution}) &middot; {date}</div>
    </header>
"#
        )?;

        if !meta.missing_tools.is_empty() {
            writeln!(
                out,
                r#"    <p class="notice">Missing tools (reduced detail): {}</p>"#,
                escape_markup(&meta.missing_tools.join(", "))
            )?;
        }

        writeln!(out, r#"    <section class="cards">"#)?;
        Self::render_cards(out, summary)?;
        writeln!(out, "    </section>")?;

        if summary.results().is_empty() {
            writeln!(out, "    <p>No suites were run.</p>")?;
        }
        for result in summary.results() {
            Self::render_suite(out, result, meta.tail_lines)?;
        }

        if !summary.skipped().is_empty() {
            let skipped: Vec<_> = summary.skipped().iter().map(|s| escape_markup(s)).collect();
            writeln!(
                out,
                r#"    <p class="notice">Skipped after failure: {}</p>"#,
                skipped.join(", ")
            )?;
        }

        write!(
            out,
            r#"  </div>
</body>
</html>
"#
        )
    }
}

/// Size estimation constants for pre-allocation.
const HTML_BASE_SIZE: usize = 3000; // Template + CSS
const HTML_SUITE_SIZE: usize = 400;

impl ReportFormatter for HtmlFormatter {
    fn format(&self, summary: &RunSummary, meta: &RunMeta) -> anyhow::Result<String> {
        let capacity = HTML_BASE_SIZE + summary.total_suites() * HTML_SUITE_SIZE;
        let mut output = String::with_capacity(capacity);
        Self::render_document(&mut output, summary, meta)?;
        Ok(output)
    }

    fn file_name(&self) -> &'static str {
        "report.html"
    }
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod tests;
