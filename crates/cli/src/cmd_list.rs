// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! List command implementation.

use std::io::Write;

use gauntlet::cli::{Cli, ListArgs};
use gauntlet::error::ExitCode;
use gauntlet::suite;

use crate::cmd_run::load_config;

/// Print the suites a run mode selects, one per line.
pub fn run(cli: &Cli, args: &ListArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let (config_path, config) = load_config(cli, &cwd)?;
    let base_dir = config_path.parent().unwrap_or(cwd.as_path());

    let suites = suite::resolve_suites(&config.suites, &args.mode, base_dir)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    if suites.is_empty() {
        writeln!(handle, "no suites configured")?;
        return Ok(ExitCode::Success);
    }
    let width = suites.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for suite in &suites {
        writeln!(handle, "{:<width$}  {}", suite.name, suite.command_line())?;
    }
    Ok(ExitCode::Success)
}
