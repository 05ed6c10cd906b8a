// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite descriptors and run-mode selection.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::config::SuiteConfig;
use crate::error::{Error, Result};

/// Run mode selecting every declared suite.
pub const ALL_MODE: &str = "all";

/// One suite to execute: a name and the command line that runs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteDescriptor {
    pub name: String,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl SuiteDescriptor {
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Build a descriptor from config.
    ///
    /// Relative commands containing a path separator resolve against
    /// `base_dir`; bare names are left for PATH lookup.
    pub fn from_config(config: &SuiteConfig, base_dir: &Path) -> Self {
        let command = Path::new(&config.command);
        let program = if command.is_relative() && command.components().count() > 1 {
            base_dir.join(command)
        } else {
            command.to_path_buf()
        };
        Self {
            name: config.name.clone(),
            program,
            args: config.args.clone(),
            env: config.env.clone(),
        }
    }

    /// Command line for display.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// File-name-safe form of the suite name.
    pub fn artifact_stem(&self) -> String {
        sanitize_name(&self.name)
    }
}

/// Replace everything outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Fail when two suites would write to the same artifact files.
pub fn check_artifact_stems(suites: &[SuiteDescriptor]) -> Result<()> {
    let mut stems: HashMap<String, &str> = HashMap::new();
    for suite in suites {
        if let Some(other) = stems.insert(suite.artifact_stem(), &suite.name) {
            return Err(Error::Config {
                message: format!(
                    "suite names '{}' and '{}' map to the same output files",
                    other, suite.name
                ),
                path: None,
            });
        }
    }
    Ok(())
}

/// Every mode the config accepts, `all` first, then the rest sorted.
pub fn known_modes(suites: &[SuiteConfig]) -> Vec<String> {
    let named: BTreeSet<&str> = suites
        .iter()
        .flat_map(|s| s.modes.iter().map(String::as_str))
        .filter(|m| *m != ALL_MODE)
        .collect();
    std::iter::once(ALL_MODE)
        .chain(named)
        .map(String::from)
        .collect()
}

/// Resolve a run mode to its suites, in declaration order.
pub fn resolve_suites(
    suites: &[SuiteConfig],
    mode: &str,
    base_dir: &Path,
) -> Result<Vec<SuiteDescriptor>> {
    let selected: Vec<SuiteDescriptor> = suites
        .iter()
        .filter(|s| mode == ALL_MODE || s.modes.iter().any(|m| m == mode))
        .map(|s| SuiteDescriptor::from_config(s, base_dir))
        .collect();

    if selected.is_empty() && mode != ALL_MODE {
        return Err(Error::UnknownMode {
            mode: mode.to_string(),
            known: known_modes(suites),
        });
    }

    tracing::debug!("mode '{}' selected {} suite(s)", mode, selected.len());
    Ok(selected)
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
