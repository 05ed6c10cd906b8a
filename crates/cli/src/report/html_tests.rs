// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::aggregate::RunSummary;
use crate::report::test_support::{create_test_meta, create_test_summary, result};

fn render(summary: &RunSummary) -> String {
    HtmlFormatter.format(summary, &create_test_meta()).unwrap()
}

#[test]
fn html_format_includes_doctype() {
    let output = render(&create_test_summary());
    assert!(output.starts_with("<!DOCTYPE html>"));
    assert!(output.trim_end().ends_with("</html>"));
}

#[test]
fn html_format_includes_title_and_css() {
    let output = render(&create_test_summary());
    assert!(output.contains("<title>Gauntlet Report</title>"));
    assert!(output.contains("<style>"));
    assert!(output.contains("</style>"));
}

#[test]
fn html_format_includes_metadata() {
    let output = render(&create_test_summary());
    assert!(output.contains("Target: http://localhost:8080"));
    assert!(output.contains("Mode: all (sequential)"));
    assert!(output.contains("2026-03-14 09:26:53 UTC"));
}

#[test]
fn html_format_one_section_per_suite() {
    let output = render(&create_test_summary());
    assert_eq!(output.matches(r#"<section class="suite passed">"#).count(), 2);
    assert_eq!(output.matches(r#"<section class="suite failed">"#).count(), 1);
}

#[test]
fn html_format_summary_cards() {
    let output = render(&create_test_summary());
    assert!(output.contains(r#"<div class="card-value">11 / 13</div>"#));
    assert!(output.contains(r#"<div class="card-value">4.500s</div>"#));
    assert!(output.contains(r#"<div class="card-value">240.0ms</div>"#));
}

#[test]
fn html_format_escapes_suite_output() {
    let output = render(&create_test_summary());
    assert!(output.contains("expected &lt;201&gt; got &quot;500&quot; &amp; body &#39;oops&#39;"));
    assert!(!output.contains("<201>"));
}

#[test]
fn html_format_escapes_suite_names() {
    let mut summary = RunSummary::new();
    summary.record(result("<script>", Some(0), (0, 0, 0), ""));
    let output = render(&summary);
    assert!(output.contains("&lt;script&gt;"));
    assert!(!output.contains("<script>"));
}

#[test]
fn html_format_truncates_output_tail() {
    let text: String = (1..=80).map(|i| format!("line {i}\n")).collect();
    let mut summary = RunSummary::new();
    summary.record(result("long", Some(1), (0, 0, 0), &text));
    let output = render(&summary);
    assert!(output.contains("line 80"));
    assert!(output.contains("line 31\n"));
    assert!(!output.contains("line 30\n"));
}

#[test]
fn html_format_empty_run() {
    let output = render(&RunSummary::new());
    assert!(output.contains("No suites were run."));
    assert!(!output.contains(r#"<section class="suite"#));
}

#[test]
fn html_format_notices() {
    let mut summary = RunSummary::new();
    summary.record(result("a", Some(1), (0, 0, 0), ""));
    summary.record_skipped("b");
    let mut meta = create_test_meta();
    meta.missing_tools = vec!["jq".into()];
    let output = HtmlFormatter.format(&summary, &meta).unwrap();
    assert!(output.contains("Skipped after failure: b"));
    assert!(output.contains("Missing tools (reduced detail): jq"));
}
