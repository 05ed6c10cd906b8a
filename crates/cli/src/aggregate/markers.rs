// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Best-effort counter markers in free-form suite output.
//!
//! Suites may print lines such as:
//!
//! ```text
//! Total tests: 12
//! Passed: 11
//! Failed: 1
//! Average response time: 143.5ms
//! ```
//!
//! Every marker is optional and the last occurrence wins, even when its value
//! cannot be read. Absence is never an error.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static TOTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Total tests:[ \t]*(\d+)").expect("valid regex"));

#[allow(clippy::expect_used)]
static PASSED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bPassed:[ \t]*(\d+)").expect("valid regex"));

#[allow(clippy::expect_used)]
static FAILED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bFailed:[ \t]*(\d+)").expect("valid regex"));

#[allow(clippy::expect_used)]
static AVG_RESPONSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Average response time:[ \t]*(\d+(?:\.\d+)?)[ \t]*ms").expect("valid regex")
});

/// CSI sequences (colors, cursor movement) emitted by colorized suites.
#[allow(clippy::expect_used)]
static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("valid regex"));

/// A counter marker suites can print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    TotalTests,
    Passed,
    Failed,
}

impl Marker {
    fn regex(self) -> &'static Regex {
        match self {
            Marker::TotalTests => &TOTAL_RE,
            Marker::Passed => &PASSED_RE,
            Marker::Failed => &FAILED_RE,
        }
    }
}

/// Counters found in one suite's output.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Counters {
    pub total: Option<u64>,
    pub passed: Option<u64>,
    pub failed: Option<u64>,
    pub avg_response_ms: Option<f64>,
}

/// Scan output for every marker.
pub fn scan(output: &str) -> Counters {
    let plain = strip_ansi(output);
    Counters {
        total: parse_marker(&plain, Marker::TotalTests),
        passed: parse_marker(&plain, Marker::Passed),
        failed: parse_marker(&plain, Marker::Failed),
        avg_response_ms: parse_average_response_ms(&plain),
    }
}

/// Value of the last occurrence of `marker`, if any.
pub fn parse_marker(output: &str, marker: Marker) -> Option<u64> {
    last_capture(marker.regex(), output)
}

/// Value of the last `Average response time: <n>ms` line, if any.
pub fn parse_average_response_ms(output: &str) -> Option<f64> {
    last_capture(&AVG_RESPONSE_RE, output)
}

fn last_capture<T: std::str::FromStr>(re: &Regex, output: &str) -> Option<T> {
    let caps = re.captures_iter(output).last()?;
    caps.get(1)?.as_str().parse().ok()
}

/// Remove ANSI escape sequences so colored output still matches.
pub fn strip_ansi(output: &str) -> Cow<'_, str> {
    ANSI_RE.replace_all(output, "")
}

#[cfg(test)]
#[path = "markers_tests.rs"]
mod tests;
