// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for report formatter tests.

// Test helpers that use unwrap for clarity (tests should panic on unexpected failures).
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::aggregate::{RunSummary, SuiteResult};
use crate::executor::Discipline;

use super::RunMeta;

/// Fixed run start so rendered output is deterministic.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
}

/// Build a result with explicit counters.
pub fn result(
    name: &str,
    exit_code: Option<i32>,
    counters: (u64, u64, u64),
    output: &str,
) -> SuiteResult {
    SuiteResult {
        suite_name: name.to_string(),
        passed: exit_code == Some(0),
        exit_code,
        duration: Duration::from_millis(1250),
        total_tests: counters.0,
        passed_tests: counters.1,
        failed_tests: counters.2,
        avg_response_ms: None,
        started_at: fixed_time(),
        output_file: PathBuf::from(format!("test-results/{name}_output.log")),
        raw_output: output.to_string(),
    }
}

/// Three suites: two passing, one failing with markup in its output.
pub fn create_test_summary() -> RunSummary {
    let mut summary = RunSummary::new();
    summary.record(result(
        "health",
        Some(0),
        (3, 3, 0),
        "Total tests: 3\nPassed: 3\nFailed: 0\n",
    ));
    summary.record(result(
        "users",
        Some(1),
        (10, 8, 2),
        "GET /users ok\nPOST /users expected <201> got \"500\" & body 'oops'\nTotal tests: 10\nPassed: 8\nFailed: 2\n",
    ));
    let mut orders = result("orders", Some(0), (0, 0, 0), "no markers here\n");
    orders.avg_response_ms = Some(240.0);
    summary.record(orders);
    summary.finish(Duration::from_millis(4500))
}

/// Metadata with a fixed timestamp.
pub fn create_test_meta() -> RunMeta {
    let mut meta = RunMeta::new("http://localhost:8080", "all");
    meta.timestamp = fixed_time();
    meta.discipline = Discipline::Sequential;
    meta
}
