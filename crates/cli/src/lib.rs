pub mod aggregate;
pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod prereq;
pub mod progress;
pub mod report;
pub mod suite;

pub use aggregate::{RunSummary, SuiteResult};
pub use cli::{Cli, Command, ListArgs, OutputFormat, RunArgs};
pub use config::Config;
pub use error::{Error, ExitCode, Result};
pub use executor::{Discipline, SuiteExecutor, SuiteHandle, SuiteRun};
pub use orchestrator::{Orchestrator, RunOptions, RunOutcome};
pub use prereq::{HttpProbe, PrerequisiteChecker, Probe};
pub use report::{ReportFormatter, RunMeta};
pub use suite::SuiteDescriptor;
