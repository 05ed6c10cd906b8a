// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles gauntlet.toml parsing with version validation and suite checks.

pub mod duration;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::suite::sanitize_name;

/// Config file name looked up by discovery.
pub const CONFIG_FILE_NAME: &str = "gauntlet.toml";

/// Only supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Environment variable carrying the target URL into suites unless overridden.
pub const DEFAULT_URL_ENV: &str = "BASE_URL";

/// Default output directory, relative to the config file.
pub const DEFAULT_OUTPUT_DIR: &str = "test-results";

/// Default number of output lines kept in HTML/JUnit tails.
pub const DEFAULT_TAIL_LINES: usize = 50;

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Full configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Service under test.
    #[serde(default)]
    pub target: TargetConfig,

    /// Execution discipline defaults.
    #[serde(default)]
    pub run: RunConfig,

    /// Report defaults.
    #[serde(default)]
    pub report: ReportConfig,

    /// External tools checked before the run.
    #[serde(default, rename = "tool")]
    pub tools: Vec<ToolConfig>,

    /// Declared suites, in run order.
    #[serde(default, rename = "suite")]
    pub suites: Vec<SuiteConfig>,
}

/// Target service settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TargetConfig {
    /// Base URL; the `--url` flag wins over this.
    pub url: Option<String>,

    /// Environment variable suites read the base URL from.
    pub url_env: String,

    /// Path appended to the base URL for the reachability probe.
    pub probe_path: Option<String>,

    /// Upper bound on the reachability probe.
    #[serde(deserialize_with = "duration::deserialize")]
    pub probe_timeout: Duration,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: None,
            url_env: DEFAULT_URL_ENV.to_string(),
            probe_path: None,
            probe_timeout: Duration::from_secs(5),
        }
    }
}

/// Execution defaults, overridable from the command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Launch every suite at once.
    pub parallel: bool,

    /// Stop sequential runs at the first failing suite.
    pub fail_fast: bool,
}

/// Report defaults, overridable from the command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub format: Option<OutputFormat>,
    pub output_dir: Option<PathBuf>,
    pub tail_lines: Option<usize>,
    pub compact: bool,
}

/// An external tool the suites or the chosen report format rely on.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// Executable name looked up on PATH.
    pub name: String,

    /// Abort the run before any suite starts when missing.
    #[serde(default)]
    pub required: bool,

    /// Report formats that lose detail without this tool.
    #[serde(default)]
    pub formats: Vec<OutputFormat>,
}

/// A single declared suite.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Unique suite name, used for artifact file names.
    pub name: String,

    /// Executable to run.
    pub command: String,

    /// Extra arguments appended to the command.
    #[serde(default)]
    pub args: Vec<String>,

    /// Run modes (besides "all") that select this suite.
    #[serde(default)]
    pub modes: Vec<String>,

    /// Extra environment for this suite only.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// Load config from a file.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config from string content.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config_error = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    // First check version
    let version_check: VersionOnly =
        toml::from_str(content).map_err(|e| config_error(e.to_string()))?;

    let version = version_check
        .version
        .ok_or_else(|| config_error("missing required field: version".to_string()))?;

    if version != SUPPORTED_VERSION {
        return Err(config_error(format!(
            "unsupported config version {} (supported: {})",
            version, SUPPORTED_VERSION
        )));
    }

    let config: Config = toml::from_str(content).map_err(|e| config_error(e.to_string()))?;
    validate_suites(&config.suites).map_err(config_error)?;
    Ok(config)
}

/// Suite names must be non-empty and unique, also after sanitizing for
/// artifact file names. Commands must be non-empty.
fn validate_suites(suites: &[SuiteConfig]) -> std::result::Result<(), String> {
    let mut seen = HashSet::new();
    let mut stems: HashMap<String, &str> = HashMap::new();
    for suite in suites {
        if suite.name.trim().is_empty() {
            return Err("suite name must not be empty".to_string());
        }
        if suite.command.trim().is_empty() {
            return Err(format!("suite '{}' has an empty command", suite.name));
        }
        if !seen.insert(suite.name.as_str()) {
            return Err(format!("duplicate suite name: {}", suite.name));
        }
        if let Some(other) = stems.insert(sanitize_name(&suite.name), &suite.name) {
            return Err(format!(
                "suite names '{}' and '{}' map to the same output files",
                other, suite.name
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
