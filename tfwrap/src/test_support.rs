//! Test-only helpers: a throwaway git repository and a recording runner.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::core::command::ToolCommand;
use crate::core::filter::FilterWindow;
use crate::core::settings::SETTINGS_FILE;
use crate::error::TfwrapError;
use crate::io::process::ToolRunner;

/// Settings with an s3 backend and two lock platforms.
pub const SAMPLE_SETTINGS: &str = r#"[init]
arch = ["linux_amd64", "darwin_amd64"]

[init.s3]
bucket = "acme-terraform-state"
region = "eu-west-1"
profile = "infra"
dynamodb_table = "terraform-locks"
"#;

/// Temporary git repository with a settings file at its root.
pub struct TestRepo {
    temp: TempDir,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        Self::with_settings(SAMPLE_SETTINGS)
    }

    pub fn with_settings(settings: &str) -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let status = Command::new("git")
            .args(["init", "-q"])
            .current_dir(temp.path())
            .status()
            .context("spawn git init")?;
        if !status.success() {
            return Err(anyhow!("git init failed: {status}"));
        }
        let repo = Self { temp };
        repo.write_settings(settings)?;
        Ok(repo)
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn write_settings(&self, contents: &str) -> Result<()> {
        let path = self.root().join(SETTINGS_FILE);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    /// Create `rel` (a `/`-separated path) holding a `main.tf`.
    pub fn module_dir(&self, rel: &str) -> Result<PathBuf> {
        let dir = rel
            .split('/')
            .fold(self.root().to_path_buf(), |acc, part| acc.join(part));
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        fs::write(dir.join("main.tf"), "terraform {}\n")
            .with_context(|| format!("write main.tf in {}", dir.display()))?;
        Ok(dir)
    }
}

/// One invocation captured by [`RecordingRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command: ToolCommand,
    pub workdir: PathBuf,
    pub windows: Vec<FilterWindow>,
}

/// Runner that records commands instead of spawning them.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<RecordedCall>>,
    exit_code: Option<i32>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded command fails with `exit_code`.
    pub fn failing(exit_code: i32) -> Self {
        Self {
            calls: RefCell::default(),
            exit_code: Some(exit_code),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn commands(&self) -> Vec<ToolCommand> {
        self.calls
            .borrow()
            .iter()
            .map(|call| call.command.clone())
            .collect()
    }
}

impl ToolRunner for RecordingRunner {
    fn run(&self, command: &ToolCommand, workdir: &Path, windows: &[FilterWindow]) -> Result<()> {
        self.calls.borrow_mut().push(RecordedCall {
            command: command.clone(),
            workdir: workdir.to_path_buf(),
            windows: windows.to_vec(),
        });
        match self.exit_code {
            Some(code) => Err(TfwrapError::Subprocess {
                command: command.display(),
                code: Some(code),
            }
            .into()),
            None => Ok(()),
        }
    }
}
