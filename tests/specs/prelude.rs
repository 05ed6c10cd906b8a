//! Test helpers for behavioral specifications.
//!
//! Each [`Project`] is a temp directory holding a `gauntlet.toml` whose
//! suites are small `sh -c` scripts.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// A URL nothing should be listening on; pair with `--skip-probe`.
pub const OFFLINE_URL: &str = "http://127.0.0.1:9";

/// Environment variables that would leak settings into a spec.
const ISOLATED_ENV: &[&str] = &[
    "GAUNTLET_CONFIG",
    "GAUNTLET_MODE",
    "GAUNTLET_URL",
    "GAUNTLET_FORMAT",
    "GAUNTLET_OUTPUT_DIR",
    "GAUNTLET_LOG",
    "NO_COLOR",
    "COLOR",
];

/// Returns a Command configured to run the gauntlet binary
pub fn gauntlet_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gauntlet"));
    for var in ISOLATED_ENV {
        cmd.env_remove(var);
    }
    cmd
}

/// `[[suite]]` table running `script` through `sh -c`.
///
/// The script is embedded in a TOML literal string, so it must not contain
/// single quotes.
pub fn suite(name: &str, script: &str) -> String {
    suite_in_modes(name, script, &[])
}

/// Like [`suite`], also selectable by the given run modes.
pub fn suite_in_modes(name: &str, script: &str, modes: &[&str]) -> String {
    let modes: Vec<String> = modes.iter().map(|m| format!("\"{m}\"")).collect();
    format!(
        "\n[[suite]]\nname = \"{name}\"\ncommand = \"sh\"\nargs = [\"-c\", '{script}']\nmodes = [{}]\n",
        modes.join(", ")
    )
}

/// A temporary project with a gauntlet.toml.
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    /// Create a project whose config is `version = 1` followed by `body`.
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("gauntlet.toml"),
            format!("version = 1\n{body}"),
        )
        .unwrap();
        Self { dir }
    }

    /// Create a project from several `[[suite]]` snippets.
    pub fn with_suites(suites: &[String]) -> Self {
        Self::new(&suites.concat())
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Default output directory.
    pub fn results(&self) -> PathBuf {
        self.path().join("test-results")
    }

    /// `gauntlet run` in this project, probe disabled, against [`OFFLINE_URL`].
    pub fn run(&self) -> Command {
        let mut cmd = gauntlet_cmd();
        cmd.current_dir(self.path())
            .args(["run", "--skip-probe", "-u", OFFLINE_URL]);
        cmd
    }

    /// `gauntlet` with arbitrary arguments in this project.
    pub fn cmd(&self) -> Command {
        let mut cmd = gauntlet_cmd();
        cmd.current_dir(self.path());
        cmd
    }
}

/// A loopback URL whose port was just released.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
