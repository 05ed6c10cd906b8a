// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! Walks from the current directory up to the git root looking for gauntlet.toml.

use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;
use crate::error::{Error, Result};

/// Find gauntlet.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            return Some(config_path);
        }

        if current.join(".git").exists() {
            return None;
        }

        current = current.parent()?;
    }
}

/// Resolve the config path from the CLI flag (or `GAUNTLET_CONFIG`) or discovery.
///
/// Suites are only declared in config, so a missing config is an error.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.exists() => Ok(path.to_path_buf()),
        Some(path) => Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        }),
        None => find_config(cwd).ok_or_else(|| Error::Config {
            message: format!(
                "no {CONFIG_FILE_NAME} found in {} or its parents",
                cwd.display()
            ),
            path: None,
        }),
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
