// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use yare::parameterized;

const MISSING_TOOL: &str = "gauntlet-no-such-tool";

/// Serve a single HTTP response on a loopback port, returning the base URL.
fn serve_once(status_line: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let response = format!("{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{addr}")
}

/// A loopback URL nothing listens on.
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

struct RecordingProbe {
    urls: Arc<Mutex<Vec<String>>>,
    result: std::result::Result<u16, String>,
}

impl Probe for RecordingProbe {
    fn probe(&self, url: &str, _timeout: Duration) -> std::result::Result<u16, String> {
        self.urls.lock().unwrap().push(url.to_string());
        self.result.clone()
    }
}

fn tool(name: &str, required: bool, formats: &[OutputFormat]) -> ToolConfig {
    ToolConfig {
        name: name.to_string(),
        required,
        formats: formats.to_vec(),
    }
}

#[test]
fn http_probe_accepts_any_response() {
    let url = serve_once("HTTP/1.1 404 Not Found");
    let status = HttpProbe.probe(&url, Duration::from_secs(5)).unwrap();
    assert_eq!(status, 404);
}

#[test]
fn http_probe_fails_on_closed_port() {
    let url = closed_port_url();
    assert!(HttpProbe.probe(&url, Duration::from_secs(2)).is_err());
}

#[test]
fn http_probe_times_out_on_silent_server() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    // Accept and hold the connection without answering
    let holder = thread::spawn(move || {
        let conn = listener.accept();
        thread::sleep(Duration::from_secs(2));
        drop(conn);
    });

    let err = HttpProbe.probe(&url, Duration::from_millis(200)).unwrap_err();
    assert!(!err.is_empty());
    holder.join().unwrap();
}

#[test]
fn unreachable_target_is_fatal() {
    let checker = PrerequisiteChecker::new(Some(Box::new(HttpProbe)))
        .with_timeout(Duration::from_secs(2));
    let err = checker
        .check(&closed_port_url(), OutputFormat::Console)
        .unwrap_err();
    assert!(matches!(err, Error::Unreachable { .. }));
}

#[test]
fn reachable_target_is_ready() {
    let url = serve_once("HTTP/1.1 200 OK");
    let checker = PrerequisiteChecker::new(Some(Box::new(HttpProbe)));
    let readiness = checker.check(&url, OutputFormat::Json).unwrap();
    assert!(readiness.missing_tools.is_empty());
}

#[test]
fn probe_uses_configured_path() {
    let urls = Arc::new(Mutex::new(Vec::new()));
    let probe = RecordingProbe {
        urls: Arc::clone(&urls),
        result: Ok(200),
    };
    let checker =
        PrerequisiteChecker::new(Some(Box::new(probe))).with_probe_path(Some("/health".into()));

    checker
        .check("http://api.local/", OutputFormat::Console)
        .unwrap();
    assert_eq!(*urls.lock().unwrap(), ["http://api.local/health"]);
}

#[test]
fn disabled_probe_never_fails() {
    let checker = PrerequisiteChecker::new(None);
    assert!(checker.check(&closed_port_url(), OutputFormat::Html).is_ok());
}

#[test]
fn missing_required_tool_is_fatal() {
    let checker = PrerequisiteChecker::new(None).with_tools(vec![tool(MISSING_TOOL, true, &[])]);
    let err = checker.check("http://x", OutputFormat::Console).unwrap_err();
    match err {
        Error::MissingTool { name } => assert_eq!(name, MISSING_TOOL),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_format_tool_degrades() {
    let checker = PrerequisiteChecker::new(None)
        .with_tools(vec![tool(MISSING_TOOL, false, &[OutputFormat::Json])]);
    let readiness = checker.check("http://x", OutputFormat::Json).unwrap();
    assert_eq!(readiness.missing_tools, [MISSING_TOOL]);
}

#[test]
fn tool_for_other_format_is_not_checked() {
    let checker = PrerequisiteChecker::new(None)
        .with_tools(vec![tool(MISSING_TOOL, false, &[OutputFormat::Junit])]);
    let readiness = checker.check("http://x", OutputFormat::Console).unwrap();
    assert!(readiness.missing_tools.is_empty());
}

#[test]
fn present_tool_is_not_reported() {
    let checker = PrerequisiteChecker::new(None).with_tools(vec![tool("sh", true, &[])]);
    let readiness = checker.check("http://x", OutputFormat::Console).unwrap();
    assert!(readiness.missing_tools.is_empty());
}

#[parameterized(
    no_path = { "http://h:1", None, "http://h:1" },
    empty_path = { "http://h:1", Some(""), "http://h:1" },
    plain = { "http://h:1", Some("health"), "http://h:1/health" },
    both_slashes = { "http://h:1/", Some("/health"), "http://h:1/health" },
)]
fn joins_probe_url(base: &str, path: Option<&str>, expected: &str) {
    assert_eq!(probe_url(base, path), expected);
}

#[test]
fn detects_tools_on_path() {
    assert!(tool_available("sh"));
    assert!(!tool_available(MISSING_TOOL));
}
