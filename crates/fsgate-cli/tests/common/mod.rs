//! Common test utilities for fsgate-cli integration tests.

use std::path::PathBuf;

use clap::Parser;
use fsgate_cli::cli::Cli;
use fsgate_cli::{Result, commands};
use tempfile::TempDir;

/// Tree used by the `check` tests:
///
/// ```text
/// /                 fsgate:supergroup  rwxr-xr-x
/// /dir1             leo:sales          rwxr-x---
/// /dir1/file1       leo:sales          rw-rw-r--
/// /tmp              fsgate:supergroup  rwxrwxrwt
/// ```
pub const TREE: &str = r#"
[root]
owner = "fsgate"
group = "supergroup"
mode = 0o755

[[node]]
path = "/dir1/file1"
kind = "file"
owner = "leo"
group = "sales"
mode = 0o664

[[node]]
path = "/dir1"
kind = "dir"
owner = "leo"
group = "sales"
mode = 0o750

[[node]]
path = "/tmp"
kind = "dir"
owner = "fsgate"
group = "supergroup"
mode = 0o1777
"#;

/// Temporary directory holding a tree fixture and a config file.
pub struct TestHarness {
    /// Keeps the directory alive
    pub dir: TempDir,
    /// The tree fixture
    pub tree: PathBuf,
    /// The config file
    pub config: PathBuf,
}

impl TestHarness {
    /// Writes [`TREE`] and a config with the given `[permissions]` body.
    pub fn with_config(permissions: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let tree = dir.path().join("tree.toml");
        let config = dir.path().join("config.toml");
        std::fs::write(&tree, TREE).expect("write tree");
        std::fs::write(&config, format!("[permissions]\n{permissions}\n")).expect("write config");
        Self { dir, tree, config }
    }

    /// A harness with an empty configuration.
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// Runs `fsgate --config <config> <args>`.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        let config = self.config.display().to_string();
        let mut argv = vec!["fsgate", "--config", config.as_str()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).expect("valid arguments");
        commands::run(cli.config.as_deref(), cli.command)
    }

    /// Runs `fsgate check --tree <tree> <args>`.
    pub fn check(&self, args: &[&str]) -> Result<String> {
        let tree = self.tree.display().to_string();
        let mut argv = vec!["check", "--tree", tree.as_str()];
        argv.extend_from_slice(args);
        self.run(&argv)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
