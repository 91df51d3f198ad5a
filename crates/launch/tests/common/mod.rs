//! Common test utilities for CLI integration tests

#![allow(dead_code)]

use anyhow::Result;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Test context holding a scratch directory with a services file
pub struct CliTestContext {
    pub test_dir: TempDir,
    pub config_path: PathBuf,
}

impl CliTestContext {
    /// Create a context whose services file has the given content
    pub fn with_config(yaml: &str) -> Result<Self> {
        let test_dir = TempDir::new()?;
        let config_path = test_dir.path().join("services.yaml");
        std::fs::write(&config_path, yaml)?;

        Ok(Self {
            test_dir,
            config_path,
        })
    }

    /// Run the CLI against the context's services file
    pub fn run_cli_command(&self, args: &[&str]) -> Result<CliOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_launch"))
            .arg("--file")
            .arg(&self.config_path)
            .args(args)
            .env_remove("RUST_LOG")
            .env_remove("LAUNCH_CONFIG")
            .output()?;

        Ok(CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            exit_code: output.status.code(),
        })
    }
}

/// Captured output of a CLI run
pub struct CliOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub exit_code: Option<i32>,
}

impl CliOutput {
    pub fn assert_success(&self) -> &Self {
        if !self.success {
            panic!(
                "Command failed with exit code {:?}\nSTDOUT:\n{}\nSTDERR:\n{}",
                self.exit_code, self.stdout, self.stderr
            );
        }
        self
    }

    pub fn assert_failure(&self) -> &Self {
        if self.success {
            panic!(
                "Command succeeded but was expected to fail\nSTDOUT:\n{}\nSTDERR:\n{}",
                self.stdout, self.stderr
            );
        }
        self
    }

    pub fn assert_contains(&self, text: &str) -> &Self {
        if !self.stdout.contains(text) && !self.stderr.contains(text) {
            panic!(
                "Output does not contain '{}'\nSTDOUT:\n{}\nSTDERR:\n{}",
                text, self.stdout, self.stderr
            );
        }
        self
    }

    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        if !self.stderr.contains(text) {
            panic!(
                "STDERR does not contain '{}'\nSTDERR:\n{}",
                text, self.stderr
            );
        }
        self
    }

    /// Non-empty stdout lines
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().filter(|l| !l.trim().is_empty()).collect()
    }
}

/// A small stack: web -> api -> (db, cache), worker -> db, plus docs
pub const STACK_YAML: &str = r#"
version: "1.0"
name: "test-stack"
services:
  web:
    image: "stack/web"
    links: ["api:backend"]
  api:
    image: "stack/api"
    depends_on: [db]
    links: ["cache"]
  worker:
    depends_on: [db]
  db:
    image: postgres
  cache:
    image: redis
  docs: {}
"#;
