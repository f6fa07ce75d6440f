//! Shared helpers for binary-driven integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Runs the compiled `policy-docs` binary.
pub struct PolicyDocs;

impl PolicyDocs {
    /// Runs the binary with `args` and an environment free of the
    /// variables that would change its behavior.
    pub fn run(args: &[&str]) -> Output {
        Self::run_with_env(args, &[])
    }

    /// Runs the binary with `args` and extra environment variables.
    pub fn run_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_policy-docs"));
        command
            .args(args)
            .env_remove("POLICY_DOCS_LOG_LEVEL")
            .env_remove("POLICY_DOCS_COLOR")
            .env_remove("POLICY_DOCS_RELEASE_CONFIG")
            .env_remove("TAP_GITHUB_USER")
            .env_remove("TAP_GITHUB_TOKEN");
        for (key, value) in env {
            command.env(key, value);
        }
        command.output().expect("failed to run policy-docs binary")
    }

    /// Absolute path of a file under `tests/fixtures`.
    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }
}

/// Converts a path to `&str` for use as an argument.
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("test paths are UTF-8")
}

/// Asserts success and returns stderr for diagnostics.
pub fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{what} should exit 0, got {:?}: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
}
