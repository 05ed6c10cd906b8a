// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use tempfile::tempdir;

const URL: &str = "http://127.0.0.1:9999";

fn sh(name: &str, script: &str) -> SuiteDescriptor {
    SuiteDescriptor::new(name, "sh").with_args(["-c", script])
}

#[test]
fn passes_exit_code_through_verbatim() {
    let dir = tempdir().unwrap();
    let executor = SuiteExecutor::new(URL, dir.path());

    assert_eq!(executor.run(&sh("ok", "exit 0")).unwrap().exit_code, Some(0));
    assert_eq!(executor.run(&sh("bad", "exit 3")).unwrap().exit_code, Some(3));
}

#[test]
fn interleaves_stdout_and_stderr_in_write_order() {
    let dir = tempdir().unwrap();
    let executor = SuiteExecutor::new(URL, dir.path());

    let run = executor
        .run(&sh("mixed", "echo one; echo two >&2; echo three"))
        .unwrap();
    assert_eq!(run.raw_output, "one\ntwo\nthree\n");
}

#[test]
fn writes_suite_scoped_output_artifact() {
    let dir = tempdir().unwrap();
    let executor = SuiteExecutor::new(URL, dir.path());

    let run = executor.run(&sh("user api", "echo hello")).unwrap();
    assert_eq!(run.output_file, dir.path().join("user_api_output.log"));
    assert_eq!(std::fs::read_to_string(&run.output_file).unwrap(), "hello\n");
}

#[test]
fn injects_target_url_into_default_env_var() {
    let dir = tempdir().unwrap();
    let executor = SuiteExecutor::new(URL, dir.path());

    let run = executor.run(&sh("env", "echo \"$BASE_URL\"")).unwrap();
    assert_eq!(run.raw_output.trim(), URL);
}

#[test]
fn injects_target_url_into_custom_env_var() {
    let dir = tempdir().unwrap();
    let executor = SuiteExecutor::new(URL, dir.path()).with_url_env("API_URL");

    let run = executor.run(&sh("env", "echo \"$API_URL\"")).unwrap();
    assert_eq!(run.raw_output.trim(), URL);
}

#[test]
fn exposes_suite_name_and_extra_env() {
    let dir = tempdir().unwrap();
    let executor = SuiteExecutor::new(URL, dir.path());
    let mut suite = sh("named", "echo \"$GAUNTLET_SUITE:$PAGE_SIZE\"");
    suite.env.insert("PAGE_SIZE".into(), "10".into());

    let run = executor.run(&suite).unwrap();
    assert_eq!(run.raw_output.trim(), "named:10");
}

#[test]
fn runs_from_work_dir() {
    let dir = tempdir().unwrap();
    let work = tempdir().unwrap();
    std::fs::write(work.path().join("marker.txt"), "").unwrap();
    let executor = SuiteExecutor::new(URL, dir.path()).with_work_dir(work.path());

    let run = executor.run(&sh("cwd", "test -f marker.txt")).unwrap();
    assert_eq!(run.exit_code, Some(0));
}

#[test]
fn spawn_failure_is_a_failed_run_not_an_error() {
    let dir = tempdir().unwrap();
    let executor = SuiteExecutor::new(URL, dir.path());

    let run = executor
        .run(&SuiteDescriptor::new("ghost", "/nonexistent/gauntlet-suite"))
        .unwrap();
    assert_eq!(run.exit_code, None);
    assert!(run.raw_output.contains("failed to spawn"));
    let artifact = std::fs::read_to_string(&run.output_file).unwrap();
    assert!(artifact.contains("failed to spawn"));
}

#[test]
fn missing_output_dir_is_an_io_error() {
    let dir = tempdir().unwrap();
    let executor = SuiteExecutor::new(URL, dir.path().join("missing"));

    let err = executor.run(&sh("x", "true")).err().unwrap();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn measures_wall_clock_duration() {
    let dir = tempdir().unwrap();
    let executor = SuiteExecutor::new(URL, dir.path());

    let run = executor.run(&sh("slow", "sleep 0.2")).unwrap();
    assert!(run.duration >= Duration::from_millis(200));
}

#[test]
fn launch_does_not_wait_for_the_suite() {
    let dir = tempdir().unwrap();
    let executor = SuiteExecutor::new(URL, dir.path());

    let start = Instant::now();
    let handles: Vec<_> = (0..3)
        .map(|i| executor.launch(&sh(&format!("s{i}"), "sleep 1")).unwrap())
        .collect();
    assert!(start.elapsed() < Duration::from_millis(900));

    let runs: Vec<_> = handles.into_iter().map(SuiteHandle::join).collect();
    // All three slept concurrently
    assert!(start.elapsed() < Duration::from_millis(2500));
    assert!(runs.iter().all(|r| r.exit_code == Some(0)));
}

#[test]
fn handle_reports_suite_name() {
    let dir = tempdir().unwrap();
    let executor = SuiteExecutor::new(URL, dir.path());

    let handle = executor.launch(&sh("named", "true")).unwrap();
    assert_eq!(handle.suite_name(), "named");
    handle.join();
}

#[test]
fn discipline_names() {
    assert_eq!(Discipline::from_parallel(false), Discipline::Sequential);
    assert_eq!(Discipline::from_parallel(true), Discipline::Concurrent);
    assert_eq!(Discipline::Concurrent.name(), "parallel");
}
