// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pre-flight checks run before any suite launches.
//!
//! An unreachable target is fatal. Missing tools are fatal only when marked
//! `required`; otherwise the run continues and reports note the gap.

use std::process::{Command, Stdio};
use std::time::Duration;

use crate::cli::OutputFormat;
use crate::config::ToolConfig;
use crate::error::{Error, Result};

/// Reachability probe against the target service.
pub trait Probe {
    /// Send one request to `url`, returning the HTTP status on any response.
    fn probe(&self, url: &str, timeout: Duration) -> std::result::Result<u16, String>;
}

/// Probe issuing a single blocking HTTP GET.
pub struct HttpProbe;

impl Probe for HttpProbe {
    fn probe(&self, url: &str, timeout: Duration) -> std::result::Result<u16, String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| format!("failed to create client: {e}"))?;

        let response = client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                format!("no response within {:?}", timeout)
            } else {
                e.to_string()
            }
        })?;
        Ok(response.status().as_u16())
    }
}

/// Outcome of a successful pre-flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Readiness {
    /// Optional tools for the selected format that are not installed.
    pub missing_tools: Vec<String>,
}

/// Runs the reachability probe and tool checks.
pub struct PrerequisiteChecker {
    probe: Option<Box<dyn Probe>>,
    timeout: Duration,
    probe_path: Option<String>,
    tools: Vec<ToolConfig>,
}

impl PrerequisiteChecker {
    /// Create a checker. `None` disables the reachability probe.
    pub fn new(probe: Option<Box<dyn Probe>>) -> Self {
        Self {
            probe,
            timeout: Duration::from_secs(5),
            probe_path: None,
            tools: Vec::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_probe_path(mut self, path: Option<String>) -> Self {
        self.probe_path = path;
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolConfig>) -> Self {
        self.tools = tools;
        self
    }

    /// Verify the target answers and the tools for `format` are present.
    pub fn check(&self, target_url: &str, format: OutputFormat) -> Result<Readiness> {
        self.check_reachable(target_url)?;
        let missing_tools = self.check_tools(format)?;
        Ok(Readiness { missing_tools })
    }

    fn check_reachable(&self, target_url: &str) -> Result<()> {
        let Some(probe) = &self.probe else {
            tracing::debug!("reachability probe skipped");
            return Ok(());
        };

        let url = probe_url(target_url, self.probe_path.as_deref());
        tracing::debug!("probing {} (timeout {:?})", url, self.timeout);
        match probe.probe(&url, self.timeout) {
            Ok(status) => {
                tracing::info!("target reachable: {} answered {}", url, status);
                Ok(())
            }
            Err(reason) => Err(Error::Unreachable { url, reason }),
        }
    }

    /// Names of missing non-required tools relevant to `format`.
    fn check_tools(&self, format: OutputFormat) -> Result<Vec<String>> {
        let mut missing = Vec::new();
        for tool in &self.tools {
            let relevant =
                tool.required || tool.formats.is_empty() || tool.formats.contains(&format);
            if !relevant || tool_available(&tool.name) {
                continue;
            }
            if tool.required {
                return Err(Error::MissingTool {
                    name: tool.name.clone(),
                });
            }
            tracing::warn!(
                "{} not found; {} report will have reduced detail",
                tool.name,
                format.name()
            );
            missing.push(tool.name.clone());
        }
        Ok(missing)
    }
}

/// Join the base URL and an optional probe path with exactly one slash.
pub fn probe_url(base: &str, path: Option<&str>) -> String {
    match path {
        Some(path) if !path.is_empty() => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
        _ => base.to_string(),
    }
}

/// Check if a tool can be launched from PATH.
pub fn tool_available(name: &str) -> bool {
    Command::new(name)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

#[cfg(test)]
#[path = "prereq_tests.rs"]
mod tests;
