// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use gauntlet::cli::{Cli, OutputFormat, RunArgs};
use gauntlet::color::resolve_color;
use gauntlet::config::{self, Config, DEFAULT_OUTPUT_DIR, DEFAULT_TAIL_LINES};
use gauntlet::discovery;
use gauntlet::error::{Error, ExitCode};
use gauntlet::executor::{Discipline, SuiteExecutor};
use gauntlet::orchestrator::{Orchestrator, RunOptions};
use gauntlet::prereq::{HttpProbe, PrerequisiteChecker, Probe};
use gauntlet::progress::ProgressWriter;
use gauntlet::suite;

/// Run the run command.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let (config_path, config) = load_config(cli, &cwd)?;
    let base_dir = config_path.parent().unwrap_or(cwd.as_path()).to_path_buf();

    let options = resolve_options(args, &config, &cwd, &base_dir)?;
    let suites = suite::resolve_suites(&config.suites, &options.mode, &base_dir)?;

    if options.compact && options.format != OutputFormat::Json {
        eprintln!("warning: --compact only applies to JSON output, ignoring");
    }

    let probe: Option<Box<dyn Probe>> = if args.skip_probe {
        None
    } else {
        Some(Box::new(HttpProbe))
    };
    let checker = PrerequisiteChecker::new(probe)
        .with_timeout(config.target.probe_timeout)
        .with_probe_path(config.target.probe_path.clone())
        .with_tools(config.tools.clone());
    let executor = SuiteExecutor::new(&options.target_url, &options.output_dir)
        .with_url_env(&config.target.url_env)
        .with_work_dir(&base_dir);

    let format = options.format;
    let mut orchestrator = Orchestrator::new(options)
        .with_checker(checker)
        .with_executor(executor);
    if !args.quiet {
        let mut progress = ProgressWriter::stderr(resolve_color());
        orchestrator = orchestrator.on_result(move |result| {
            if let Err(e) = progress.write_result(result) {
                tracing::debug!("cannot write progress: {}", e);
            }
        });
    }

    let outcome = orchestrator.run(&suites)?;

    if !args.quiet && !outcome.summary.skipped().is_empty() {
        let mut progress = ProgressWriter::stderr(resolve_color());
        for name in outcome.summary.skipped() {
            progress.write_skipped(name)?;
        }
    }

    // Console and JSON are meant to be read or piped; HTML and JUnit are files
    if matches!(format, OutputFormat::Console | OutputFormat::Json) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if !args.quiet && format == OutputFormat::Console {
            writeln!(handle)?;
        }
        handle.write_all(outcome.report.content.as_bytes())?;
        if format == OutputFormat::Json {
            writeln!(handle)?;
        }
    }
    if !args.quiet {
        eprintln!("report written to {}", outcome.report.path.display());
    }

    Ok(outcome.exit_code)
}

/// Locate and parse the config, returning its absolute path.
pub(crate) fn load_config(cli: &Cli, cwd: &Path) -> anyhow::Result<(PathBuf, Config)> {
    let path = discovery::resolve_config(cli.config.as_deref(), cwd)?;
    let path = if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    };
    tracing::debug!("loading config from {}", path.display());
    let config = config::load(&path)?;
    Ok((path, config))
}

/// Merge CLI flags (and their env vars) over config over defaults.
fn resolve_options(
    args: &RunArgs,
    config: &Config,
    cwd: &Path,
    base_dir: &Path,
) -> Result<RunOptions, Error> {
    let target_url = args
        .url
        .clone()
        .or_else(|| config.target.url.clone())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            Error::Argument(
                "no target URL: pass --url, set GAUNTLET_URL or add target.url to the config"
                    .to_string(),
            )
        })?;

    // CLI paths are relative to the working directory, config paths to the config file
    let output_dir = match (&args.output_dir, &config.report.output_dir) {
        (Some(dir), _) => cwd.join(dir),
        (None, Some(dir)) => base_dir.join(dir),
        (None, None) => base_dir.join(DEFAULT_OUTPUT_DIR),
    };

    Ok(RunOptions {
        target_url,
        mode: args.mode.clone(),
        discipline: Discipline::from_parallel(args.parallel || config.run.parallel),
        fail_fast: args.fail_fast || config.run.fail_fast,
        format: args.output.or(config.report.format).unwrap_or_default(),
        compact: args.compact || config.report.compact,
        tail_lines: args
            .tail_lines
            .or(config.report.tail_lines)
            .unwrap_or(DEFAULT_TAIL_LINES),
        output_dir,
    })
}
