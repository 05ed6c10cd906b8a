// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// Gauntlet error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// Run mode that selects no configured suite.
    #[error("unknown run mode '{mode}' (known modes: {})", .known.join(", "))]
    UnknownMode { mode: String, known: Vec<String> },

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Target service did not answer the reachability probe.
    #[error("target unreachable: {url}: {reason}")]
    Unreachable { url: String, reason: String },

    /// A tool marked as required is not installed.
    #[error("required tool not found: {name}")]
    MissingTool { name: String },

    /// The rendered report could not be persisted.
    #[error("failed to write report {}: {source}", .path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using gauntlet Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Every executed suite passed
    Success = 0,
    /// One or more suites failed
    SuiteFailed = 1,
    /// Configuration or argument error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
    /// Pre-flight check failed before any suite ran
    PrerequisiteFailed = 4,
    /// Report could not be written
    ReportFailed = 5,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) | Error::UnknownMode { .. } => {
                ExitCode::ConfigError
            }
            Error::Unreachable { .. } | Error::MissingTool { .. } => ExitCode::PrerequisiteFailed,
            Error::ReportWrite { .. } => ExitCode::ReportFailed,
            Error::Io { .. } | Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
