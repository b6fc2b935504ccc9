//! Shared testing utilities for portfolio CLI tests.

use assert_cmd::Command;
use portfolio::Portfolio;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ISOLATED_ENV: [&str; 5] =
    ["PORTFOLIO_MARKET", "PORTFOLIO_STATE", "PORTFOLIO_API_KEYS", "PORTFOLIO_BASE_URL", "RUST_LOG"];

/// Testing harness providing an isolated working directory for CLI runs.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for the compiled `portfolio` binary with a clean environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("portfolio").expect("Failed to locate portfolio binary");
        cmd.current_dir(&self.work_dir).env("HOME", self.root.path());
        for key in ISOLATED_ENV {
            cmd.env_remove(key);
        }
        cmd
    }

    /// Command using the offline market and the context's state file.
    pub fn mock_cli(&self) -> Command {
        let mut cmd = self.cli();
        cmd.args(["--market", "mock", "--state"]).arg(self.state_path());
        cmd
    }

    pub fn state_path(&self) -> PathBuf {
        self.work_dir.join("state.json")
    }

    pub fn read_state(&self) -> Portfolio {
        let content = fs::read_to_string(self.state_path()).expect("state file should exist");
        serde_json::from_str(&content).expect("state file should be valid JSON")
    }

    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.work_dir.join("portfolio.toml");
        fs::write(&path, content).expect("Failed to write config");
        path
    }
}
