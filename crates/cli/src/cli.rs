// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

/// Runs API test suites against a target service and reports the results
#[derive(Parser)]
#[command(name = "gauntlet")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "GAUNTLET_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the suites selected by a run mode
    Run(RunArgs),
    /// List the suites a run mode selects without running them
    List(ListArgs),
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Run mode: "all" or a named subset of suites
    #[arg(value_name = "MODE", env = "GAUNTLET_MODE", default_value = "all")]
    pub mode: String,

    /// Base URL of the service under test
    #[arg(short, long, env = "GAUNTLET_URL")]
    pub url: Option<String>,

    /// Report format
    #[arg(short, long, env = "GAUNTLET_FORMAT")]
    pub output: Option<OutputFormat>,

    /// Directory for suite logs, result files and the report
    #[arg(short = 'd', long, env = "GAUNTLET_OUTPUT_DIR", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Launch all suites at once and wait for all of them
    #[arg(short, long)]
    pub parallel: bool,

    /// Stop after the first failing suite (sequential runs only)
    #[arg(long)]
    pub fail_fast: bool,

    /// Skip the target reachability probe
    #[arg(long)]
    pub skip_probe: bool,

    /// Single-line JSON output
    #[arg(long)]
    pub compact: bool,

    /// Lines of suite output kept in HTML and JUnit reports
    #[arg(long, value_name = "N")]
    pub tail_lines: Option<usize>,

    /// Suppress per-suite progress lines on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Run mode: "all" or a named subset of suites
    #[arg(value_name = "MODE", env = "GAUNTLET_MODE", default_value = "all")]
    pub mode: String,
}

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary on stdout
    #[default]
    Console,
    /// Single JSON document
    Json,
    /// Standalone HTML page
    Html,
    /// JUnit XML for CI systems
    Junit,
}

impl OutputFormat {
    /// Lowercase format name as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Console => "console",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
            OutputFormat::Junit => "junit",
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
