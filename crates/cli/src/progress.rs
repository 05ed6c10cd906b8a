// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-suite progress lines.
//!
//! ```text
//! PASS health (1.204s, 3 tests)
//! FAIL users (0.870s, 2 of 10 tests failed, exit 1)
//! SKIP orders
//! ```

use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::aggregate::SuiteResult;
use crate::color::scheme;
use crate::report::seconds;

/// Writes one line per finished suite.
pub struct ProgressWriter<W: WriteColor> {
    out: W,
}

impl ProgressWriter<StandardStream> {
    /// Progress on stderr, keeping stdout for the report.
    pub fn stderr(color_choice: ColorChoice) -> Self {
        Self::new(StandardStream::stderr(color_choice))
    }
}

impl<W: WriteColor> ProgressWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_result(&mut self, result: &SuiteResult) -> std::io::Result<()> {
        if result.passed {
            self.out.set_color(&scheme::pass())?;
            write!(self.out, "PASS")?;
        } else {
            self.out.set_color(&scheme::fail())?;
            write!(self.out, "FAIL")?;
        }
        self.out.reset()?;
        write!(self.out, " ")?;
        self.out.set_color(&scheme::suite_name())?;
        write!(self.out, "{}", result.suite_name)?;
        self.out.reset()?;

        self.out.set_color(&scheme::detail())?;
        write!(self.out, " ({}s", seconds(result.duration))?;
        if result.failed_tests > 0 {
            write!(
                self.out,
                ", {} of {} tests failed",
                result.failed_tests, result.total_tests
            )?;
        } else if result.total_tests > 0 {
            write!(self.out, ", {} tests", result.total_tests)?;
        }
        if !result.passed {
            match result.exit_code {
                Some(code) => write!(self.out, ", exit {code}")?,
                None => write!(self.out, ", no exit code")?,
            }
        }
        write!(self.out, ")")?;
        self.out.reset()?;
        writeln!(self.out)
    }

    pub fn write_skipped(&mut self, suite_name: &str) -> std::io::Result<()> {
        self.out.set_color(&scheme::skip())?;
        write!(self.out, "SKIP")?;
        self.out.reset()?;
        writeln!(self.out, " {suite_name}")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
