//! Git adapter used to locate the repository root.

use std::path::PathBuf;
use std::process::{Command, Output};

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::error::TfwrapError;

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Absolute path of the enclosing repository's top-level directory.
    #[instrument(skip_all, fields(workdir = %self.workdir.display()))]
    pub fn toplevel(&self) -> Result<PathBuf> {
        let output = self.run(&["rev-parse", "--show-toplevel"]).map_err(|err| {
            TfwrapError::RepositoryNotFound {
                dir: self.workdir.clone(),
                stderr: format!("{err:#}"),
            }
        })?;
        if !output.status.success() {
            return Err(TfwrapError::RepositoryNotFound {
                dir: self.workdir.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        let root = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
        debug!(root = %root, "repository root");
        Ok(PathBuf::from(root))
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("spawn git {}", args.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestRepo;

    #[test]
    fn toplevel_from_nested_dir() {
        let repo = TestRepo::new().expect("repo");
        let nested = repo.module_dir("envs/prod").expect("module dir");
        let root = Git::new(&nested).toplevel().expect("toplevel");
        assert_eq!(
            root.canonicalize().expect("canonical root"),
            repo.root().canonicalize().expect("canonical repo")
        );
    }

    #[test]
    fn outside_repository_is_classified() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = Git::new(temp.path()).toplevel().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TfwrapError>(),
            Some(TfwrapError::RepositoryNotFound { .. })
        ));
    }
}
